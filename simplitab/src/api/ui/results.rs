//! Result Renderer
//!
//! Renders the results area purely from a [`ViewState`] snapshot:
//! placeholder, loading indicator, error box, or the tablature card.
//! All model- and user-supplied text is escaped.

use crate::models::RiffResult;
use crate::view::ViewState;
use axum::{extract::State, response::Html};
use simplitab_common::events::ViewPhase;

use crate::AppState;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn render_placeholder() -> String {
    r#"<div class="placeholder" data-phase="Idle">
    <p>Escolha uma música para começar</p>
</div>"#
        .to_string()
}

fn render_loading() -> String {
    r#"<div class="loading" data-phase="Loading">
    <span class="spinner"></span>
    <span>SIMPLIFICANDO...</span>
</div>"#
        .to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error-box" data-phase="Error" role="alert">
    <span class="error-icon">!</span>
    <div class="error-message">{}</div>
</div>"#,
        escape_html(message)
    )
}

fn render_tab_lines(riff: &RiffResult) -> String {
    riff.tab
        .iter()
        .map(|line| {
            format!(
                r#"        <div class="tab-line"><span class="tab-string">{}</span><span class="tab-sep">|</span><span class="tab-notes">{}</span></div>"#,
                escape_html(&line.string_label),
                escape_html(&line.notes)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_riff(riff: &RiffResult, copied: bool) -> String {
    let (copy_label, copy_class) = if copied {
        ("Copiado!", "copy-button copied")
    } else {
        ("Copiar Tablatura", "copy-button")
    };

    format!(
        r#"<div class="tab-card" data-phase="Result">
    <div class="tab-card-header">
        <div>
            <h2 class="song-title">{title}</h2>
            <p class="song-artist">{artist}</p>
        </div>
        <div class="tab-meta">
            <span class="difficulty-badge">{difficulty}</span>
            <div class="tuning">
                <div class="tuning-label">Afinação</div>
                <div class="tuning-value">{tuning}</div>
            </div>
        </div>
    </div>
    <div class="tab-body">
        <button type="button" id="copy-button" class="{copy_class}" title="Copiar Tablatura">{copy_label}</button>
        <div class="tab-lines">
{lines}
        </div>
        <div class="tip">
            <h4>Dica para Facilitar</h4>
            <p class="explanation">{explanation}</p>
        </div>
    </div>
</div>"#,
        title = escape_html(&riff.song_title),
        artist = escape_html(&riff.artist),
        difficulty = escape_html(&riff.difficulty_label),
        tuning = escape_html(&riff.tuning),
        copy_class = copy_class,
        copy_label = copy_label,
        lines = render_tab_lines(riff),
        explanation = escape_html(&riff.explanation),
    )
}

/// Render the results area for `state`
pub fn render_results(state: &ViewState) -> String {
    match state.phase() {
        ViewPhase::Idle => render_placeholder(),
        ViewPhase::Loading => render_loading(),
        ViewPhase::Error => render_error(state.error.as_deref().unwrap_or_default()),
        ViewPhase::Result => match &state.result {
            Some(riff) => render_riff(riff, state.copied),
            None => render_placeholder(),
        },
    }
}

/// GET /view/results
///
/// Results-area fragment, re-fetched by the page on every ViewChanged event
pub async fn results_fragment(State(state): State<AppState>) -> Html<String> {
    Html(render_results(&state.controller.snapshot().await))
}
