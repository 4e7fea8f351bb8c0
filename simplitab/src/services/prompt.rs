//! Instruction template and response schema sent to the generative model

use crate::models::GenerationRequest;
use serde_json::{json, Value};

/// Longest song/artist text interpolated into the instruction
pub const MAX_FIELD_CHARS: usize = 120;

/// Clean user text before it is interpolated into the instruction
///
/// Control characters are dropped, double quotes become single quotes (the
/// song title sits inside a quoted span), whitespace runs collapse to one
/// space, and the result is capped at [`MAX_FIELD_CHARS`] characters.
pub fn sanitize_field(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '"' | '“' | '”' => '\'',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .filter(|c| !c.is_control())
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_FIELD_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Render the instruction text for one request
pub fn build_instruction(request: &GenerationRequest) -> String {
    let song = sanitize_field(&request.song);
    let artist_clause = request
        .artist
        .as_deref()
        .map(sanitize_field)
        .filter(|a| !a.is_empty())
        .map(|a| format!(" do artista {}", a))
        .unwrap_or_default();

    format!(
        "Você é um instrutor de guitarra para iniciantes absolutos.
Sua tarefa é criar a versão MAIS FÁCIL POSSÍVEL do riff principal de \"{song}\"{artist_clause}.

REGRAS DE OURO PARA FACILIDADE:
1. FOCO NO INICIANTE: O riff deve ser \"nível 1\". Use cordas soltas sempre que possível.
2. QUALQUER CORDA: Você pode usar de 1 a 6 cordas, mas use o mínimo necessário para manter a simplicidade.
3. EVITE SALTOS: Tente manter as notas próximas umas das outras no braço da guitarra (preferencialmente casas 0 a 5).
4. ALINHAMENTO: Todas as linhas da tablatura retornadas no array 'tab' DEVEM ter exatamente o mesmo comprimento (mesmo número de hífens/caracteres).
5. ESTILO: Use o padrão ASCII tradicional.

CONTEXTO DO NÍVEL: {level}

Retorne um JSON com:
- songTitle
- artist
- tuning (ex: Standard)
- difficultyLabel (ex: \"Ultra Fácil\", \"Nível Zero\", \"Para Crianças\")
- tab (array de objetos {{string: \"E\", notes: \"---0-2-3---\"}}) - inclua apenas as cordas usadas no arranjo.
- explanation: Uma dica pedagógica curta em português focada em como posicionar os dedos para facilitar ainda mais.",
        song = song,
        artist_clause = artist_clause,
        level = request.level.description(),
    )
}

/// Response schema in the generative service's OpenAPI subset
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "songTitle": { "type": "STRING" },
            "artist": { "type": "STRING" },
            "tuning": { "type": "STRING" },
            "difficultyLabel": { "type": "STRING" },
            "tab": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "string": { "type": "STRING" },
                        "notes": { "type": "STRING" }
                    },
                    "required": ["string", "notes"]
                }
            },
            "explanation": { "type": "STRING" }
        },
        "required": ["songTitle", "artist", "tuning", "difficultyLabel", "tab", "explanation"]
    })
}
