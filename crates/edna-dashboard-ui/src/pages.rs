use edna_dashboard::query_results::{QueryResult, QueryResultLookup, NO_CLASSIFICATION_MESSAGE};
use edna_dashboard::DashboardTheme;
use leptos::prelude::*;

use crate::{EDNA_BRAND_NAME, EDNA_BRAND_TAGLINE};

const LANDING_FEATURES: [(&str, &str); 4] = [
    (
        "Comprehensive Analysis",
        "Cluster eDNA reads and score every cluster for taxonomic novelty.",
    ),
    (
        "Real-time Processing",
        "Submit query sequences and inspect alignments as soon as they finish.",
    ),
    (
        "Interactive Dashboards",
        "Compare datasets through coverage, trend and size distributions.",
    ),
    (
        "Scientist Review",
        "Route novel clusters to verified scientists for expert validation.",
    ),
];

const LANDING_USE_CASES: [&str; 3] = [
    "Biodiversity surveys of deep-sea habitats",
    "Discovery of novel eukaryotic lineages",
    "Long-term monitoring of hydrothermal vent communities",
];

pub fn render_edna_landing_page() -> String {
    let features = LANDING_FEATURES
        .into_iter()
        .map(|(title, description)| {
            view! {
                <article data-component="FeatureCard">
                    <h3>{title}</h3>
                    <p>{description}</p>
                </article>
            }
        })
        .collect_view();
    let use_cases = LANDING_USE_CASES
        .into_iter()
        .map(|use_case| view! { <li>{use_case}</li> })
        .collect_view();
    let footer = format!("© 2025 {EDNA_BRAND_NAME} Project. All rights reserved.");

    view! {
        <div id="edna-landing" data-app="edna-landing">
            <header>
                <a id="edna-brand" href="/">{EDNA_BRAND_NAME}</a>
                <a id="edna-login-link" href="/login">"Login"</a>
            </header>
            <section id="edna-hero">
                <h1>"Discover Marine Biodiversity"</h1>
                <p>{EDNA_BRAND_TAGLINE}</p>
                <a id="edna-get-started" href="/login">"Get Started"</a>
            </section>
            <section id="edna-features" data-feature-count="4">
                <h2>"Features"</h2>
                {features}
            </section>
            <section id="edna-use-cases">
                <h2>"Use Cases"</h2>
                <ul>{use_cases}</ul>
            </section>
            <footer>
                <p>{footer}</p>
            </footer>
        </div>
    }
    .to_html()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdnaLoginPageContext {
    pub theme: DashboardTheme,
    pub email: String,
    pub notice: Option<String>,
}

pub fn render_edna_login_page(context: &EdnaLoginPageContext) -> String {
    let theme_attr = context.theme.as_str();
    let email = context.email.clone();
    let notice = context.notice.clone().map(|notice| {
        view! {
            <p id="edna-login-notice" role="status">
                {notice}
            </p>
        }
    });

    view! {
        <div id="edna-login" data-app="edna-login" data-theme=theme_attr>
            <section data-component="LoginCard">
                <h1>"Scientist Login"</h1>
                <p>{EDNA_BRAND_TAGLINE}</p>
                {notice}
                <form id="edna-login-form" method="post" action="/login">
                    <label for="edna-login-email">"Email"</label>
                    <input
                        id="edna-login-email"
                        type="email"
                        name="email"
                        value=email
                        placeholder="scientist@institute.org"
                    />
                    <label for="edna-login-password">"Password"</label>
                    <input id="edna-login-password" type="password" name="password" />
                    <button type="submit">"Sign In"</button>
                </form>
                <form id="edna-login-google-form" method="post" action="/login/google">
                    <button type="submit">"Sign in with Google"</button>
                </form>
                <p>"Restricted to verified scientists only."</p>
                <p>"Contact admin for access requests."</p>
            </section>
        </div>
    }
    .to_html()
}

pub fn render_edna_query_result_page(lookup: QueryResultLookup<'_>) -> String {
    let body = match lookup {
        QueryResultLookup::NoSelection => view! {
            <p id="edna-result-empty" data-result-state="no-selection">
                "Select a result to view details."
            </p>
        }
        .into_any(),
        QueryResultLookup::NotFound => view! {
            <p id="edna-result-empty" data-result-state="not-found">
                "Result not found."
            </p>
        }
        .into_any(),
        QueryResultLookup::Found(result) => query_result_details(result),
    };

    view! {
        <div id="edna-result" data-app="edna-query-result">
            <a id="edna-result-back" href="/dashboard/queries">"Back to Query Analysis"</a>
            {body}
        </div>
    }
    .to_html()
}

fn query_result_details(result: &QueryResult) -> AnyView {
    let query_id = result.id.clone();
    let title = result.title().to_string();
    let icon = result.result_icon().as_str();
    let tier = result.novelty_tier();
    let similarity = format!("{}% similarity", result.similarity);
    let novelty = format!("Novelty {}%", result.novelty_score);
    let timestamp = result.timestamp.format("%Y-%m-%d %H:%M UTC").to_string();
    let tree_url = result.phylogenetic_tree_url.clone();
    let tree_alt = format!("Phylogenetic tree for {}", result.id);

    let alignment = &result.alignment;
    let alignment_text = format!(
        "Query: {}\n       {}\nSbjct: {}",
        alignment.query, alignment.markers, alignment.matched
    );
    let sequence = result.sequence.clone();
    let score = alignment.score.to_string();
    let bits = alignment.bits.to_string();
    let e_value = format!("{:e}", alignment.e_value);
    let length = format!("{} bp", result.length);
    let gc_content = format!("{}%", result.gc_content);
    let accession = result.accession.clone();

    let lineage = result.lineage();
    let lineage_view = if lineage.is_empty() {
        view! { <p id="edna-result-no-classification">{NO_CLASSIFICATION_MESSAGE}</p> }.into_any()
    } else {
        let ranks = lineage
            .into_iter()
            .enumerate()
            .map(|(depth, rank)| {
                let style = format!("padding-left: {}px", depth * 10);
                let depth = depth.to_string();
                let rank = rank.to_string();
                view! {
                    <li data-lineage-depth=depth style=style>
                        {rank}
                    </li>
                }
            })
            .collect_view();
        view! { <ol id="edna-result-lineage">{ranks}</ol> }.into_any()
    };

    view! {
        <article data-component="QueryResultDetail" data-query-id=query_id>
            <header>
                <span data-result-icon=icon></span>
                <h1>{title}</h1>
                <p>{timestamp}</p>
                <span data-badge-variant="outline">{similarity}</span>
                <span data-badge-variant={tier.variant()}>{tier.label()}</span>
                <span data-badge-variant="secondary">{novelty}</span>
            </header>
            <section id="edna-result-tree">
                <h2>"Phylogenetic Tree"</h2>
                <img src=tree_url alt=tree_alt />
            </section>
            <section id="edna-result-alignment">
                <h2>"Sequence Alignment"</h2>
                <pre>{alignment_text}</pre>
            </section>
            <section id="edna-result-sequence">
                <h2>"Query Sequence"</h2>
                <pre>{sequence}</pre>
            </section>
            <section id="edna-result-summary">
                <h2>"Summary"</h2>
                <dl>
                    <dt>"Score"</dt>
                    <dd data-summary="score">{score}</dd>
                    <dt>"Bits"</dt>
                    <dd data-summary="bits">{bits}</dd>
                    <dt>"E-value"</dt>
                    <dd data-summary="e-value">{e_value}</dd>
                    <dt>"Length"</dt>
                    <dd data-summary="length">{length}</dd>
                    <dt>"GC Content"</dt>
                    <dd data-summary="gc-content">{gc_content}</dd>
                    <dt>"Accession"</dt>
                    <dd data-summary="accession">{accession}</dd>
                </dl>
            </section>
            <section id="edna-result-taxonomy">
                <h2>"Taxonomic Classification"</h2>
                {lineage_view}
            </section>
        </article>
    }
    .into_any()
}
