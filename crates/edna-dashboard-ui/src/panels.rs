use edna_dashboard::cluster_table::{ClusterField, TaxonomicAnnotation};
use edna_dashboard::overview::GlobalOverviewSnapshot;
use edna_dashboard::query_results::QueryResult;
use edna_dashboard::shell::{DashboardPanel, DashboardTheme, DatasetDetailPanel, ReviewItem};
use edna_dashboard::view_router::DashboardView;
use edna_dashboard::{Dataset, DatasetId};
use leptos::prelude::*;

use crate::{bool_attr, cluster_table_href, format_thousands};

pub(crate) fn render_panel(panel: DashboardPanel<'_>) -> AnyView {
    match panel {
        DashboardPanel::GlobalOverview(snapshot) => global_overview_panel(snapshot),
        DashboardPanel::Datasets(datasets) => datasets_panel(datasets),
        DashboardPanel::Queries(results) => queries_panel(results),
        DashboardPanel::Review(items) => review_panel(&items),
        DashboardPanel::Settings { theme, logged_in } => settings_panel(theme, logged_in),
        DashboardPanel::DatasetDetail(detail) => dataset_detail_panel(detail),
        DashboardPanel::DatasetNotFound { dataset_id } => dataset_not_found_panel(dataset_id),
    }
}

fn bar_style(value: usize, max: usize) -> String {
    let percent = if max == 0 { 0 } else { value * 100 / max };
    format!("--bar-percent: {percent}%")
}

fn global_overview_panel(snapshot: GlobalOverviewSnapshot) -> AnyView {
    let empty_state = snapshot.is_empty().then(|| {
        view! {
            <p id="edna-overview-empty-state">
                "No datasets yet. Add a dataset to populate the overview."
            </p>
        }
    });

    let trend_point_count = snapshot.novel_trend.len().to_string();
    let trend_max = snapshot
        .novel_trend
        .iter()
        .map(|point| point.novel_clusters)
        .max()
        .unwrap_or(0);
    let trend_rows = snapshot
        .novel_trend
        .iter()
        .map(|point| {
            let label = point.label.clone();
            let label_attr = point.label.clone();
            let value = point.novel_clusters.to_string();
            let value_attr = value.clone();
            let style = bar_style(point.novel_clusters, trend_max);
            view! {
                <li data-bar="trend" data-label=label_attr data-value=value_attr style=style>
                    <span>{label}</span>
                    <span>{value}</span>
                </li>
            }
        })
        .collect_view();

    let coverage_headers = TaxonomicAnnotation::ALL
        .into_iter()
        .map(|annotation| view! { <th scope="col">{annotation.as_str()}</th> })
        .collect_view();
    let coverage_rows = snapshot
        .taxonomic_coverage
        .iter()
        .map(|coverage| {
            let name = coverage.dataset_name.clone();
            let name_attr = coverage.dataset_name.clone();
            let cells = coverage
                .shares
                .iter()
                .map(|share| {
                    let percent = format!("{:.1}%", share.percent);
                    view! { <td data-annotation={share.annotation.as_str()}>{percent}</td> }
                })
                .collect_view();
            view! {
                <tr data-dataset-name=name_attr>
                    <th scope="row">{name}</th>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    let novel_percent = format!("{:.1}", snapshot.novel_vs_known.novel_percent);
    let known_percent = format!("{:.1}", snapshot.novel_vs_known.known_percent);
    let novel_label = format!("Novel: {novel_percent}%");
    let known_label = format!("Known: {known_percent}%");

    let top_max = snapshot
        .top_clusters
        .iter()
        .map(|cluster| cluster.size as usize)
        .max()
        .unwrap_or(0);
    let top_count = snapshot.top_clusters.len().to_string();
    let top_rows = snapshot
        .top_clusters
        .iter()
        .map(|cluster| {
            let label = format!("{} / {}", cluster.dataset_id, cluster.cluster_id);
            let size = cluster.size.to_string();
            let size_attr = size.clone();
            let dataset_attr = cluster.dataset_id.to_string();
            let style = bar_style(cluster.size as usize, top_max);
            view! {
                <li data-bar="top-cluster" data-dataset-id=dataset_attr data-size=size_attr style=style>
                    <span>{label}</span>
                    <span>{size}</span>
                </li>
            }
        })
        .collect_view();

    let matrix_headers = snapshot
        .comparison
        .labels
        .iter()
        .map(|label| {
            let label = label.clone();
            view! { <th scope="col">{label}</th> }
        })
        .collect_view();
    let matrix_rows = snapshot
        .comparison
        .labels
        .iter()
        .zip(snapshot.comparison.cells.iter())
        .map(|(label, row)| {
            let label = label.clone();
            let cells = row
                .iter()
                .map(|shared| {
                    let shared = shared.to_string();
                    view! { <td>{shared}</td> }
                })
                .collect_view();
            view! {
                <tr>
                    <th scope="row">{label}</th>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    view! {
        <section id="edna-global-overview" data-component="GlobalOverview">
            <h1>"Global Overview"</h1>
            <p>"Comprehensive analysis across all datasets"</p>
            {empty_state}
            <section id="edna-overview-trend" data-component="AreaChart" data-point-count=trend_point_count>
                <h2>"Trend of Novel Clusters"</h2>
                <ol>{trend_rows}</ol>
            </section>
            <section id="edna-overview-taxonomic-coverage" data-component="StackedBarChart">
                <h2>"Taxonomic Coverage"</h2>
                <table>
                    <thead>
                        <tr>
                            <th scope="col">"Dataset"</th>
                            {coverage_headers}
                        </tr>
                    </thead>
                    <tbody>{coverage_rows}</tbody>
                </table>
            </section>
            <section
                id="edna-overview-novel-vs-known"
                data-component="PieChart"
                data-novel-percent=novel_percent
                data-known-percent=known_percent
            >
                <h2>"Novel vs Known"</h2>
                <p>{novel_label}</p>
                <p>{known_label}</p>
            </section>
            <section id="edna-overview-top-clusters" data-component="BarChart" data-cluster-count=top_count>
                <h2>"Top 10 Largest Clusters"</h2>
                <ol>{top_rows}</ol>
            </section>
            <section id="edna-overview-comparison" data-component="Heatmap">
                <h2>"Dataset Comparison"</h2>
                <table>
                    <thead>
                        <tr>
                            <th scope="col"></th>
                            {matrix_headers}
                        </tr>
                    </thead>
                    <tbody>{matrix_rows}</tbody>
                </table>
            </section>
        </section>
    }
    .into_any()
}

fn datasets_panel(datasets: &[Dataset]) -> AnyView {
    let dataset_count = datasets.len().to_string();
    let empty_state = datasets.is_empty().then(|| {
        view! {
            <p id="edna-datasets-empty-state">
                "No datasets registered yet. Use + Add Dataset to upload one."
            </p>
        }
    });
    let cards = datasets
        .iter()
        .map(|dataset| {
            let dataset_id = dataset.id.to_string();
            let dataset_id_attr = dataset_id.clone();
            let href = DashboardView::DatasetDetail(dataset.id.clone()).shell_path();
            let delete_action = format!("{href}/delete");
            let name = dataset.name.clone();
            let created = format!("Created: {}", dataset.created_at.format("%Y-%m-%d"));
            let id_label = format!("ID: {dataset_id}");
            view! {
                <article data-component="DatasetCard" data-dataset-id=dataset_id_attr>
                    <h2>
                        <a href=href>{name}</a>
                    </h2>
                    <p>{created}</p>
                    <p>{id_label}</p>
                    <form method="post" action=delete_action>
                        <button type="submit">"Delete"</button>
                    </form>
                </article>
            }
        })
        .collect_view();

    view! {
        <section id="edna-datasets" data-component="DatasetGrid" data-dataset-count=dataset_count>
            <h1>"Datasets"</h1>
            {empty_state}
            <div id="edna-dataset-grid">{cards}</div>
        </section>
    }
    .into_any()
}

fn queries_panel(results: &[QueryResult]) -> AnyView {
    let result_count = results.len().to_string();
    let empty_state = results.is_empty().then(|| {
        view! { <p id="edna-queries-empty-state">"No query results yet."</p> }
    });
    let rows = results
        .iter()
        .map(|result| {
            let query_id = result.id.clone();
            let query_id_attr = result.id.clone();
            let href = format!("/dashboard/result?id={}", result.id);
            let title = result.title().to_string();
            let tier = result.novelty_tier();
            let novelty = format!("{}%", result.novelty_score);
            let similarity = format!("{}%", result.similarity);
            let length = format!("{} bp", result.length);
            let gc_content = format!("{}%", result.gc_content);
            view! {
                <tr data-query-id=query_id_attr data-novelty-tier={tier.label()}>
                    <td>
                        <a href=href>{query_id}</a>
                    </td>
                    <td>{title}</td>
                    <td>{similarity}</td>
                    <td>
                        <span data-badge-variant={tier.variant()}>{tier.label()}</span>
                        " "
                        {novelty}
                    </td>
                    <td>{length}</td>
                    <td>{gc_content}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <section id="edna-queries" data-component="QueryAnalysis" data-result-count=result_count>
            <h1>"Query Analysis"</h1>
            <form id="edna-add-query-form" method="post" action="/dashboard/queries">
                <label for="edna-add-query-sequence">"Sequence (FASTA or raw nucleotides)"</label>
                <textarea id="edna-add-query-sequence" name="sequence" rows="6"></textarea>
                <button type="submit">"Analyze Sequence"</button>
            </form>
            {empty_state}
            <table id="edna-query-table">
                <thead>
                    <tr>
                        <th scope="col">"Query ID"</th>
                        <th scope="col">"Best Match"</th>
                        <th scope="col">"Similarity"</th>
                        <th scope="col">"Novelty"</th>
                        <th scope="col">"Length"</th>
                        <th scope="col">"GC Content"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
    .into_any()
}

fn review_panel(items: &[ReviewItem<'_>]) -> AnyView {
    let item_count = items.len().to_string();
    let empty_state = items.is_empty().then(|| {
        view! { <p id="edna-review-empty-state">"No clusters awaiting review."</p> }
    });
    let rows = items
        .iter()
        .map(|item| {
            let dataset_name = item.dataset.name.clone();
            let href = DashboardView::DatasetDetail(item.dataset.id.clone()).shell_path();
            let cluster_id = item.cluster.id.clone();
            let cluster_attr = item.cluster.id.clone();
            let novelty = item.cluster.novelty_label();
            let category = item.cluster.novelty_category.as_str();
            let validation = item.cluster.expert_validation.as_str();
            view! {
                <tr data-cluster-id=cluster_attr data-validation={item.cluster.expert_validation.token()}>
                    <td>
                        <a href=href>{dataset_name}</a>
                    </td>
                    <td>{cluster_id}</td>
                    <td>{novelty}</td>
                    <td>{category}</td>
                    <td>{validation}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <section id="edna-review" data-component="ReviewQueue" data-item-count=item_count>
            <h1>"Review Panel"</h1>
            <p>"Clusters awaiting expert validation"</p>
            {empty_state}
            <table>
                <thead>
                    <tr>
                        <th scope="col">"Dataset"</th>
                        <th scope="col">"Cluster ID"</th>
                        <th scope="col">"Novelty"</th>
                        <th scope="col">"Novelty Category"</th>
                        <th scope="col">"Expert Validation"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
    .into_any()
}

fn settings_panel(theme: DashboardTheme, logged_in: bool) -> AnyView {
    let theme_attr = theme.as_str();
    let next_theme = theme.toggled();
    let toggle_href = format!("/dashboard/settings?theme={}", next_theme.as_str());
    let toggle_label = format!("Switch to {} theme", next_theme.as_str());
    let session_label = if logged_in {
        "Signed in as a verified scientist."
    } else {
        "Not signed in."
    };
    view! {
        <section
            id="edna-settings"
            data-component="Settings"
            data-theme=theme_attr
            data-logged-in={bool_attr(logged_in)}
        >
            <h1>"Settings"</h1>
            <section id="edna-settings-theme">
                <h2>"Appearance"</h2>
                <a id="edna-settings-theme-toggle" href=toggle_href>{toggle_label}</a>
            </section>
            <section id="edna-settings-session">
                <h2>"Session"</h2>
                <p>{session_label}</p>
            </section>
        </section>
    }
    .into_any()
}

fn dataset_detail_panel(panel: DatasetDetailPanel<'_>) -> AnyView {
    let dataset_id = panel.dataset.id.to_string();
    let dataset_id_attr = dataset_id.clone();
    let name = panel.dataset.name.clone();
    let subtitle = format!("Analysis for dataset ID: {dataset_id}");
    let source = format!("Source: {}", panel.source);
    let created = format!("Created: {}", panel.dataset.created_at.format("%Y-%m-%d"));
    let detail_path = DashboardView::DatasetDetail(panel.dataset.id.clone()).shell_path();
    let filter_action = detail_path.clone();
    let filter_text = panel.table.filter_text.clone();
    let filter_attr = panel.table.filter_text.clone();
    let sort = panel.table.sort;

    let total_reads = format_thousands(panel.summary.total_reads);
    let total_clusters = format_thousands(panel.summary.total_clusters as u64);
    let novel_clusters = format_thousands(panel.summary.novel_clusters as u64);
    let avg_novelty = format!("{:.1}%", panel.summary.avg_novelty);

    let headers = ClusterField::ALL
        .into_iter()
        .map(|field| {
            let next = sort.toggled(field);
            let href = cluster_table_href(&detail_path, &filter_text, next);
            view! {
                <th scope="col" data-sort-key={field.as_str()} aria-sort={sort.aria_sort_for(field)}>
                    <a href=href data-next-direction={next.direction.as_str()}>
                        {field.header_label()}
                    </a>
                </th>
            }
        })
        .collect_view();

    let row_count = panel.rows.len();
    let row_count_value = row_count.to_string();
    let rows = panel
        .rows
        .iter()
        .map(|record| {
            let cells = ClusterField::ALL
                .into_iter()
                .map(|field| {
                    let value = field.display_value(record);
                    if field == ClusterField::Novelty {
                        view! {
                            <td data-field={field.as_str()}>
                                <span data-badge-variant={record.novelty_badge().variant()}>{value}</span>
                            </td>
                        }
                        .into_any()
                    } else {
                        view! { <td data-field={field.as_str()}>{value}</td> }.into_any()
                    }
                })
                .collect_view();
            let cluster_id = record.id.clone();
            view! { <tr data-row-id=cluster_id>{cells}</tr> }
        })
        .collect_view();
    let empty_state = (row_count == 0).then(|| {
        view! {
            <p id="edna-cluster-empty-state">"No clusters match the current filter."</p>
        }
    });

    let histogram_max = panel
        .histogram
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or(0);
    let histogram_rows = panel
        .histogram
        .iter()
        .map(|bucket| {
            let lower = bucket.lower_bound.to_string();
            let label = format!("{}%", bucket.lower_bound);
            let count = bucket.count.to_string();
            let count_attr = count.clone();
            let style = bar_style(bucket.count, histogram_max);
            view! {
                <li data-bar="novelty" data-lower-bound=lower data-count=count_attr style=style>
                    <span>{label}</span>
                    <span>{count}</span>
                </li>
            }
        })
        .collect_view();
    let scatter_count = panel.scatter.len().to_string();
    let scatter_points = panel
        .scatter
        .iter()
        .map(|point| {
            let cluster_id = point.cluster_id.clone();
            let size = point.size.to_string();
            let novelty = point.novelty.to_string();
            view! { <li data-point-id=cluster_id data-size=size data-novelty=novelty></li> }
        })
        .collect_view();

    view! {
        <section id="edna-dataset-detail" data-component="DatasetAnalysis" data-dataset-id=dataset_id_attr>
            <header>
                <h1>{name}</h1>
                <p>{subtitle}</p>
                <p>{source}</p>
                <p>{created}</p>
            </header>
            <section id="edna-dataset-stats" data-kpi-card-count="4">
                <article data-component="StatCard" data-kpi-card="total-reads">
                    <h2>"Total Reads"</h2>
                    <p>{total_reads}</p>
                </article>
                <article data-component="StatCard" data-kpi-card="total-clusters">
                    <h2>"Total Clusters"</h2>
                    <p>{total_clusters}</p>
                </article>
                <article data-component="StatCard" data-kpi-card="novel-clusters">
                    <h2>"Novel Clusters"</h2>
                    <p>{novel_clusters}</p>
                </article>
                <article data-component="StatCard" data-kpi-card="avg-novelty">
                    <h2>"Avg. Novelty"</h2>
                    <p>{avg_novelty}</p>
                </article>
            </section>
            <section
                id="edna-cluster-table"
                data-component="ClusterTable"
                data-sort-key={sort.key.as_str()}
                data-sort-direction={sort.direction.as_str()}
                data-row-count=row_count_value
            >
                <h2>"Cluster Details"</h2>
                <p>"Detailed breakdown of each cluster identified in the dataset."</p>
                <form id="edna-cluster-filter-form" method="get" action=filter_action>
                    <input
                        id="edna-cluster-filter-input"
                        type="search"
                        name="filter"
                        value=filter_attr
                        placeholder="Filter by ID or annotation..."
                    />
                    <input type="hidden" name="sort" value={sort.key.as_str()} />
                    <input type="hidden" name="direction" value={sort.direction.as_str()} />
                    <button type="submit">"Filter"</button>
                </form>
                <table>
                    <thead>
                        <tr>{headers}</tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                {empty_state}
            </section>
            <section id="edna-dataset-visualization">
                <section id="edna-novelty-distribution" data-component="AreaChart">
                    <h2>"Novelty Score Distribution"</h2>
                    <ol>{histogram_rows}</ol>
                </section>
                <section id="edna-cluster-size-scatter" data-component="ScatterChart" data-point-count=scatter_count>
                    <h2>"Cluster Size Distribution"</h2>
                    <ul>{scatter_points}</ul>
                </section>
                <section id="edna-dataset-review-actions">
                    <h2>"Review & Actions"</h2>
                    <p>"Provide feedback, approve the dataset, or flag for further investigation."</p>
                </section>
            </section>
        </section>
    }
    .into_any()
}

fn dataset_not_found_panel(dataset_id: &DatasetId) -> AnyView {
    let dataset_id_attr = dataset_id.to_string();
    let message = format!("No dataset with ID {dataset_id} is registered in this session.");
    view! {
        <section id="edna-dataset-not-found" data-dataset-id=dataset_id_attr>
            <h1>"Dataset not found"</h1>
            <p>{message}</p>
            <a href="/dashboard/datasets">"Back to datasets"</a>
        </section>
    }
    .into_any()
}
