//! Root page handler - form and results area

use super::results::{escape_html, render_results};
use crate::api::buildinfo::BuildInfo;
use crate::models::{SimplificationLevel, PRESETS};
use crate::view::ViewState;
use crate::AppState;
use axum::{extract::State, response::Html};

fn render_level_buttons(selected: SimplificationLevel) -> String {
    SimplificationLevel::ALL
        .iter()
        .map(|level| {
            let class = if *level == selected {
                "level-button active"
            } else {
                "level-button"
            };
            format!(
                r#"<button type="button" class="{}" data-level="{}">{}</button>"#,
                class,
                level.as_str(),
                level.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n                    ")
}

fn render_preset_buttons() -> String {
    PRESETS
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            format!(
                r#"<button type="button" class="preset-button" data-preset="{}">{}</button>"#,
                index,
                escape_html(preset.song)
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ")
}

/// Render the whole page for `state`
pub fn render_page(state: &ViewState, build: &BuildInfo) -> String {
    let submit_label = if state.loading {
        "SIMPLIFICANDO..."
    } else {
        "CRIAR RIFF FÁCIL"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SimpliTab</title>
    <link rel="stylesheet" href="/static/simplitab.css">
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <div class="tagline">AI Riff Simplifier</div>
                <h1>SIMPLI<span>TAB</span> <span class="connection-status" id="connection-status">Conectando...</span></h1>
                <p class="subtitle">Toque qualquer música hoje. Nossa IA cria a versão mais fácil possível para o seu nível.</p>
            </div>
            <div class="header-right">
                <div class="build-info-line">simplitab v{version}</div>
                <div class="build-info-line">{git_hash} ({profile})</div>
                <div class="build-info-line">{timestamp}</div>
            </div>
        </div>
    </header>
    <main>
        <section class="form-card">
            <form id="riff-form" autocomplete="off">
                <div class="fields">
                    <label>Qual música você quer tocar?
                        <input type="text" id="song" name="song" placeholder="Ex: Californication" value="{song}" required>
                    </label>
                    <label>Artista (opcional)
                        <input type="text" id="artist" name="artist" placeholder="Ex: Red Hot Chili Peppers" value="{artist}">
                    </label>
                </div>
                <div class="levels-title">Nível de Simplificação</div>
                <div class="levels">
                    {levels}
                </div>
                <button type="submit" id="submit-button" class="submit-button" data-loading="{loading}">{submit_label}</button>
                <div class="presets">
                <span class="presets-title">Tente estes:</span>
                {presets}
                </div>
            </form>
        </section>
        <section id="results" class="results">
{results}
        </section>
    </main>
    <footer>SimpliTab &bull; A Guitarra para Todos</footer>
    <script src="/static/simplitab.js"></script>
</body>
</html>"#,
        version = escape_html(&build.version),
        git_hash = escape_html(&build.git_hash),
        profile = escape_html(&build.build_profile),
        timestamp = escape_html(&build.build_timestamp),
        song = escape_html(&state.song),
        artist = escape_html(&state.artist),
        levels = render_level_buttons(state.level),
        loading = state.loading,
        submit_label = submit_label,
        presets = render_preset_buttons(),
        results = render_results(state),
    )
}

/// GET /
pub async fn root_page(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot().await;
    Html(render_page(&snapshot, &BuildInfo::current()))
}
