use crate::util::{from_lsp_position, to_lsp_range};
use ayla_core::DocumentStore;
use tower_lsp::lsp_types::*;

pub fn hover(documents: &DocumentStore, params: HoverParams) -> Option<Hover> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = from_lsp_position(params.text_document_position_params.position);
    let text = documents.snapshot(uri.as_str())?;

    let info = ayla_core::hover(&text, position)?;
    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.contents,
        }),
        range: Some(to_lsp_range(info.range)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(uri: &Url, line: u32, character: u32) -> HoverParams {
        HoverParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position::new(line, character),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
        }
    }

    #[test]
    fn hover_returns_markdown_for_open_document() {
        let uri = Url::parse("file:///tmp/main.ayla").expect("url");
        let documents = DocumentStore::new();
        documents.open(uri.as_str(), "egg count int = 3", 1);

        let result = hover(&documents, params(&uri, 0, 5)).expect("hover");
        let HoverContents::Markup(markup) = result.contents else {
            panic!("expected markup");
        };
        assert_eq!(markup.kind, MarkupKind::Markdown);
        assert_eq!(markup.value, "```ayla\negg count int\n```");
        assert_eq!(
            result.range,
            Some(Range::new(Position::new(0, 4), Position::new(0, 9)))
        );
    }

    #[test]
    fn hover_on_unknown_document_is_empty() {
        let uri = Url::parse("file:///tmp/missing.ayla").expect("url");
        assert!(hover(&DocumentStore::new(), params(&uri, 0, 0)).is_none());
    }
}
