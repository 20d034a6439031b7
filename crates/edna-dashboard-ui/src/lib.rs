//! Leptos SSR rendering for the EDeepNA dashboard shell and public pages.

use edna_dashboard::cluster_table::SortSpec;
use edna_dashboard::shell::{DashboardPanel, DashboardShell, DashboardTheme};
use edna_dashboard::view_router::{DashboardNavSection, DashboardView};
use edna_dashboard::Dataset;
use leptos::prelude::*;

mod pages;
mod panels;

pub use pages::{
    render_edna_landing_page, render_edna_login_page, render_edna_query_result_page,
    EdnaLoginPageContext,
};

pub const EDNA_BRAND_NAME: &str = "EDeepNA";
pub const EDNA_BRAND_TAGLINE: &str = "Deep-Sea eDNA Analysis Platform";

/// Everything the dashboard shell needs for one render.
pub struct EdnaDashboardShellContext<'a> {
    pub view: &'a DashboardView,
    pub panel: DashboardPanel<'a>,
    pub datasets: &'a [Dataset],
    pub theme: DashboardTheme,
    pub logged_in: bool,
}

impl<'a> EdnaDashboardShellContext<'a> {
    pub fn from_shell(shell: &'a DashboardShell) -> Self {
        Self {
            view: shell.current_view(),
            panel: shell.resolve_panel(),
            datasets: shell.registry().list(),
            theme: shell.theme(),
            logged_in: shell.is_logged_in(),
        }
    }
}

pub fn render_edna_dashboard_shell(shell: &DashboardShell) -> String {
    render_edna_dashboard_shell_with_context(EdnaDashboardShellContext::from_shell(shell))
}

pub fn render_edna_dashboard_shell_with_context(context: EdnaDashboardShellContext<'_>) -> String {
    let theme_attr = context.theme.as_str();
    let view_token = context.view.as_token();
    let panel_kind = context.panel.kind();
    let logged_in_value = bool_attr(context.logged_in);
    let active_section = context.view.nav_section();
    let active_shell_path = context.view.shell_path();
    let dark_theme_href = format!("{active_shell_path}?theme=dark");
    let light_theme_href = format!("{active_shell_path}?theme=light");
    let dark_theme_pressed = bool_attr(context.theme == DashboardTheme::Dark);
    let light_theme_pressed = bool_attr(context.theme == DashboardTheme::Light);
    let dataset_count_value = context.datasets.len().to_string();

    let nav_items = DashboardNavSection::ALL
        .into_iter()
        .map(|section| {
            let view = section.view();
            let nav_token = view.as_token();
            let nav_item_id = format!("edna-nav-{nav_token}");
            let href = view.shell_path();
            let current = if section == active_section {
                "page"
            } else {
                "false"
            };
            view! {
                <li id=nav_item_id>
                    <a data-nav-item=nav_token href=href aria-current=current>
                        {section.label()}
                    </a>
                </li>
            }
        })
        .collect_view();

    let dataset_links = (!context.datasets.is_empty()).then(|| {
        let links = context
            .datasets
            .iter()
            .map(|dataset| {
                let view = DashboardView::DatasetDetail(dataset.id.clone());
                let current = if context.view == &view {
                    "page"
                } else {
                    "false"
                };
                let href = view.shell_path();
                let dataset_id = dataset.id.to_string();
                let name = dataset.name.clone();
                view! {
                    <li>
                        <a data-sidebar-dataset=dataset_id href=href aria-current=current>
                            {name}
                        </a>
                    </li>
                }
            })
            .collect_view();
        view! {
            <section id="edna-sidebar-datasets" data-dataset-count=dataset_count_value>
                <h3>"Your Datasets"</h3>
                <ul>{links}</ul>
            </section>
        }
    });

    let panel = panels::render_panel(context.panel);

    let shell = view! {
        <div
            id="edna-shell"
            data-app="edna-dashboard"
            data-theme=theme_attr
            data-active-view=view_token
            data-logged-in=logged_in_value
        >
            <header id="edna-header">
                <a id="edna-brand" href="/">{EDNA_BRAND_NAME}</a>
                <p>{EDNA_BRAND_TAGLINE}</p>
                <div id="edna-theme-controls" role="group" aria-label="Theme controls">
                    <a
                        id="edna-theme-toggle-dark"
                        data-theme-option="dark"
                        aria-pressed=dark_theme_pressed
                        href=dark_theme_href
                    >
                        "Dark"
                    </a>
                    <a
                        id="edna-theme-toggle-light"
                        data-theme-option="light"
                        aria-pressed=light_theme_pressed
                        href=light_theme_href
                    >
                        "Light"
                    </a>
                </div>
                <form id="edna-logout-form" method="post" action="/logout">
                    <button type="submit">"Sign Out"</button>
                </form>
            </header>
            <div id="edna-layout">
                <aside id="edna-sidebar" data-component="Sidebar">
                    <nav aria-label="Dashboard navigation">
                        <ul>{nav_items}</ul>
                    </nav>
                    <section id="edna-sidebar-actions">
                        <form id="edna-add-dataset-form" method="post" action="/dashboard/datasets">
                            <label for="edna-add-dataset-name">"Dataset name"</label>
                            <input
                                id="edna-add-dataset-name"
                                name="name"
                                type="text"
                                placeholder="DeepSea_Pacific_2024"
                            />
                            <button type="submit">"+ Add Dataset"</button>
                        </form>
                        <a id="edna-add-query-link" href="/dashboard/queries#edna-add-query-form">
                            "+ Add Query"
                        </a>
                    </section>
                    {dataset_links}
                </aside>
                <main id="edna-panel" data-panel=panel_kind>
                    {panel}
                </main>
            </div>
        </div>
    };
    shell.to_html()
}

/// Wraps a rendered fragment into a standalone HTML document.
pub fn render_edna_document(title: &str, theme: DashboardTheme, body: &str) -> String {
    let title = escape_html_text(title);
    let theme = theme.as_str();
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{title} | {EDNA_BRAND_NAME}</title>
<style>
:root {{ color-scheme: dark; --edna-accent: #2563eb; }}
html[data-theme="light"] {{ color-scheme: light; }}
body {{ font-family: system-ui, sans-serif; margin: 0; }}
#edna-layout {{ display: flex; min-height: 100vh; }}
#edna-sidebar {{ width: 16rem; padding: 1.5rem; border-right: 1px solid #8884; }}
#edna-panel {{ flex: 1; padding: 2rem; overflow-x: auto; }}
[data-bar] {{ background: linear-gradient(90deg, var(--edna-accent) var(--bar-percent, 0%), transparent 0); }}
[aria-current="page"] {{ font-weight: 700; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

pub(crate) fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Form-encodes a query string component (`application/x-www-form-urlencoded`).
pub fn encode_query_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Detail-page link that applies `spec` while keeping the current filter.
pub fn cluster_table_href(detail_path: &str, filter_text: &str, spec: SortSpec) -> String {
    format!(
        "{detail_path}?filter={}&sort={}&direction={}",
        encode_query_component(filter_text),
        spec.key.as_str(),
        spec.direction.as_str()
    )
}

pub(crate) fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn escape_html_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests;
