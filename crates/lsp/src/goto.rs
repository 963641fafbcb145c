use crate::util::{from_lsp_position, to_lsp_range};
use ayla_core::DocumentStore;
use tower_lsp::lsp_types::*;

pub fn definition(
    documents: &DocumentStore,
    params: GotoDefinitionParams,
) -> Option<GotoDefinitionResponse> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = from_lsp_position(params.text_document_position_params.position);
    let text = documents.snapshot(uri.as_str())?;

    let range = ayla_core::definition(&text, position)?;
    Some(GotoDefinitionResponse::Scalar(Location {
        uri,
        range: to_lsp_range(range),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(uri: &Url, line: u32, character: u32) -> GotoDefinitionParams {
        GotoDefinitionParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position::new(line, character),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        }
    }

    #[test]
    fn definition_points_into_the_same_document() {
        let uri = Url::parse("file:///tmp/main.ayla").expect("url");
        let documents = DocumentStore::new();
        documents.open(uri.as_str(), "x := 1\negg count int\nprint(count)", 1);

        let Some(GotoDefinitionResponse::Scalar(location)) =
            definition(&documents, params(&uri, 2, 7))
        else {
            panic!("expected a single location");
        };
        assert_eq!(location.uri, uri);
        assert_eq!(
            location.range,
            Range::new(Position::new(1, 4), Position::new(1, 9))
        );
    }

    #[test]
    fn builtin_type_has_no_definition() {
        let uri = Url::parse("file:///tmp/main.ayla").expect("url");
        let documents = DocumentStore::new();
        documents.open(uri.as_str(), "egg x int", 1);
        assert!(definition(&documents, params(&uri, 0, 7)).is_none());
    }
}
