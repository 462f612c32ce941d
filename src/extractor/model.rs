use crate::error::ExtractError;
use crate::extractor::{matchers, Extraction, FieldFact, ModelFact};
use crate::parser::{SourceFile, SourceParser};
use log::debug;
use std::path::Path;

/// Recovers the type name and private fields of a model source.
///
/// Inherited or computed fields are not resolved; only `private <type> <name>;`
/// declarations contribute, in source order.
pub fn extract_model(source: &SourceFile) -> Extraction<ModelFact> {
    let Some(name) = matchers::type_declaration(&source.content) else {
        return Extraction::Skipped {
            reason: ExtractError::NoTypeDeclaration {
                file: source.path.clone(),
            },
        };
    };

    let fields: Vec<FieldFact> = matchers::field_declarations(&source.content)
        .map(|(declared_type, field)| FieldFact {
            name: field.to_string(),
            declared_type: declared_type.to_string(),
        })
        .collect();

    debug!("Model {} with {} fields", name, fields.len());

    Extraction::Parsed(ModelFact {
        name: name.to_string(),
        fields,
    })
}

/// Reads and extracts a model file; read failures become a skip.
pub fn extract_model_file(path: &Path) -> Extraction<ModelFact> {
    match SourceParser::read_file(path) {
        Ok(source) => extract_model(&source),
        Err(e) => Extraction::Skipped {
            reason: ExtractError::unreadable(path, &e),
        },
    }
}
