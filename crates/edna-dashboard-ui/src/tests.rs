use std::sync::Arc;

use chrono::{DateTime, Utc};
use edna_dashboard::cluster_table::{
    ClusterField, ClusterRecord, SortDirection, SortSpec, TaxonomicAnnotation,
};
use edna_dashboard::dataset_registry::FixedClock;
use edna_dashboard::fixtures::{seed_query_results, StaticClusterFixture};
use edna_dashboard::query_results::QueryResultLookup;
use edna_dashboard::{
    DashboardIntent, DashboardOutcome, DashboardShell, DashboardShellOptions, DashboardTheme,
    DashboardView,
};

use super::{
    cluster_table_href, encode_query_component, format_thousands, render_edna_dashboard_shell,
    render_edna_document, render_edna_landing_page, render_edna_login_page,
    render_edna_query_result_page, EdnaLoginPageContext,
};

fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_705_276_800, 0).expect("timestamp")
}

fn scenario_shell() -> DashboardShell {
    let clusters = vec![
        ClusterRecord::new("C1", 10, 10.0, TaxonomicAnnotation::Bacteria),
        ClusterRecord::new("C2", 20, 90.0, TaxonomicAnnotation::Archaea),
        ClusterRecord::new("C3", 30, 50.0, TaxonomicAnnotation::Unknown),
    ];
    DashboardShell::new(DashboardShellOptions::empty(
        Arc::new(StaticClusterFixture::new(clusters)),
        Arc::new(FixedClock(fixed_now())),
    ))
}

fn shell_with_dataset() -> (DashboardShell, String) {
    let mut shell = scenario_shell();
    let DashboardOutcome::DatasetAdded(dataset) = shell
        .dispatch(DashboardIntent::AddDataset {
            name: "DeepSea_Pacific_2024".to_string(),
        })
        .expect("add dataset")
    else {
        panic!("expected dataset added");
    };
    (shell, dataset.id.to_string())
}

fn row_positions(html: &str, ids: &[&str]) -> Vec<usize> {
    ids.iter()
        .map(|id| {
            html.find(&format!("data-row-id=\"{id}\""))
                .unwrap_or_else(|| panic!("missing row {id}"))
        })
        .collect()
}

#[test]
fn unit_format_thousands_groups_digits() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1,000");
    assert_eq!(format_thousands(1_234_567), "1,234,567");
}

#[test]
fn unit_cluster_table_href_encodes_filter_text() {
    assert_eq!(encode_query_component("a b&c=d"), "a+b%26c%3Dd");
    assert_eq!(encode_query_component(" c1"), "+c1");
    assert_eq!(
        cluster_table_href(
            "/dashboard/datasets/ds1",
            "deep sea",
            SortSpec::new(ClusterField::Size, SortDirection::Ascending)
        ),
        "/dashboard/datasets/ds1?filter=deep+sea&sort=size&direction=asc"
    );
}

#[test]
fn functional_render_shell_includes_foundation_markers() {
    let html = render_edna_dashboard_shell(&scenario_shell());
    assert!(html.contains("id=\"edna-shell\""));
    assert!(html.contains("id=\"edna-header\""));
    assert!(html.contains("id=\"edna-sidebar\""));
    assert!(html.contains("data-active-view=\"global-overview\""));
    assert!(html.contains("data-panel=\"global-overview\""));
    assert!(html.contains("id=\"edna-overview-empty-state\""));
    assert!(!html.contains("id=\"edna-sidebar-datasets\""));
}

#[test]
fn functional_sidebar_lists_five_sections_and_marks_active_one() {
    let mut shell = scenario_shell();
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::Queries))
        .expect("queries");
    let html = render_edna_dashboard_shell(&shell);
    assert_eq!(html.matches("data-nav-item=").count(), 5);
    assert!(html.contains("Review Panel"));
    assert!(html.contains(
        "<a data-nav-item=\"queries\" href=\"/dashboard/queries\" aria-current=\"page\">"
    ));
    assert!(html.contains(
        "<a data-nav-item=\"global-overview\" href=\"/dashboard\" aria-current=\"false\">"
    ));
    assert!(html.contains("id=\"edna-add-query-form\""));
}

#[test]
fn functional_dataset_detail_renders_rows_in_default_novelty_desc_order() {
    let (shell, dataset_id) = shell_with_dataset();
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains(&format!("data-active-view=\"dataset-{dataset_id}\"")));
    assert!(html.contains(&format!("data-sidebar-dataset=\"{dataset_id}\"")));
    assert!(html.contains("data-sort-key=\"novelty\" aria-sort=\"descending\""));
    assert!(html.contains("data-sort-key=\"size\" aria-sort=\"none\""));
    assert!(html.contains("data-row-count=\"3\""));
    assert!(html.contains("Total Reads"));

    let positions = row_positions(&html, &["C2", "C3", "C1"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn functional_sort_links_carry_toggled_direction() {
    let (shell, dataset_id) = shell_with_dataset();
    let html = render_edna_dashboard_shell(&shell).replace("&amp;", "&");
    assert!(html.contains(&format!(
        "href=\"/dashboard/datasets/{dataset_id}?filter=&sort=novelty&direction=asc\""
    )));
    assert!(html.contains(&format!(
        "href=\"/dashboard/datasets/{dataset_id}?filter=&sort=size&direction=desc\""
    )));
}

#[test]
fn functional_filter_narrows_rows_and_echoes_input_value() {
    let (mut shell, _) = shell_with_dataset();
    shell
        .dispatch(DashboardIntent::SetFilter("c1".to_string()))
        .expect("filter");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("value=\"c1\""));
    assert!(html.contains("data-row-id=\"C1\""));
    assert!(!html.contains("data-row-id=\"C2\""));
    assert!(!html.contains("data-row-id=\"C3\""));
    assert!(html.contains("data-row-count=\"1\""));
    assert!(html.contains("data-point-id=\"C2\""));
    assert!(!html.contains("id=\"edna-cluster-empty-state\""));
}

#[test]
fn regression_filter_without_matches_renders_empty_state() {
    let (mut shell, _) = shell_with_dataset();
    shell
        .dispatch(DashboardIntent::SetFilter("no-such-cluster".to_string()))
        .expect("filter");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-row-count=\"0\""));
    assert!(html.contains("No clusters match the current filter."));
}

#[test]
fn regression_unknown_dataset_view_renders_not_found_panel() {
    let mut shell = scenario_shell();
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::dataset(
            "unknown-id",
        )))
        .expect("change view");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-panel=\"dataset-not-found\""));
    assert!(html.contains("Dataset not found"));
    assert!(html.contains("data-dataset-id=\"unknown-id\""));
}

#[test]
fn functional_datasets_panel_renders_delete_forms() {
    let (mut shell, dataset_id) = shell_with_dataset();
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::Datasets))
        .expect("datasets");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-dataset-count=\"1\""));
    assert!(html.contains(&format!(
        "action=\"/dashboard/datasets/{dataset_id}/delete\""
    )));
    assert!(html.contains("Created: 2024-01-15"));
}

#[test]
fn functional_settings_panel_links_to_opposite_theme() {
    let mut shell = scenario_shell();
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::Settings))
        .expect("settings");
    shell
        .dispatch(DashboardIntent::SetTheme(DashboardTheme::Light))
        .expect("theme");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-theme=\"light\""));
    assert!(html.contains("href=\"/dashboard/settings?theme=dark\""));
    assert!(html.contains("id=\"edna-theme-toggle-light\" data-theme-option=\"light\" aria-pressed=\"true\""));
}

#[test]
fn functional_overview_renders_chart_sections_for_registered_datasets() {
    let (mut shell, _) = shell_with_dataset();
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::GlobalOverview))
        .expect("overview");
    let html = render_edna_dashboard_shell(&shell);
    assert!(!html.contains("id=\"edna-overview-empty-state\""));
    assert!(html.contains("id=\"edna-overview-trend\""));
    assert!(html.contains("data-cluster-count=\"3\""));
    assert!(html.contains("data-component=\"Heatmap\""));
}

#[test]
fn functional_landing_page_links_to_login() {
    let html = render_edna_landing_page();
    assert!(html.contains("Discover Marine Biodiversity"));
    assert!(html.contains("id=\"edna-get-started\" href=\"/login\""));
    assert_eq!(html.matches("data-component=\"FeatureCard\"").count(), 4);
    assert!(html.contains("Scientist Review"));
}

#[test]
fn functional_login_page_renders_forms_and_optional_notice() {
    let html = render_edna_login_page(&EdnaLoginPageContext::default());
    assert!(html.contains("Scientist Login"));
    assert!(html.contains("action=\"/login\""));
    assert!(html.contains("action=\"/login/google\""));
    assert!(html.contains("Restricted to verified scientists only."));
    assert!(!html.contains("id=\"edna-login-notice\""));

    let html = render_edna_login_page(&EdnaLoginPageContext {
        theme: DashboardTheme::Light,
        email: "diver@example.org".to_string(),
        notice: Some("Signed out.".to_string()),
    });
    assert!(html.contains("value=\"diver@example.org\""));
    assert!(html.contains("Signed out."));
}

#[test]
fn functional_query_result_page_covers_lookup_states() {
    let results = seed_query_results(fixed_now());
    let html = render_edna_query_result_page(QueryResultLookup::NoSelection);
    assert!(html.contains("Select a result to view details."));

    let html = render_edna_query_result_page(QueryResultLookup::NotFound);
    assert!(html.contains("Result not found."));

    let html = render_edna_query_result_page(QueryResultLookup::Found(&results[0]));
    assert!(html.contains("data-query-id=\"Q001\""));
    assert!(html.contains("Query: "));
    assert!(html.contains("Sbjct: "));
    assert!(html.contains("data-lineage-depth=\"0\" style=\"padding-left: 0px"));
    assert!(html.contains("data-lineage-depth=\"1\" style=\"padding-left: 10px"));
}

#[test]
fn regression_query_result_without_taxonomy_shows_no_classification() {
    let mut results = seed_query_results(fixed_now());
    let mut result = results.remove(0);
    result.taxonomy = None;
    let html = render_edna_query_result_page(QueryResultLookup::Found(&result));
    assert!(html.contains("No classification available."));
    assert!(!html.contains("id=\"edna-result-lineage\""));
}

#[test]
fn unit_render_document_wraps_body_with_theme() {
    let html = render_edna_document("Login <test>", DashboardTheme::Light, "<main></main>");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("data-theme=\"light\""));
    assert!(html.contains("<title>Login &lt;test&gt; | EDeepNA</title>"));
    assert!(html.contains("<main></main>"));
}
