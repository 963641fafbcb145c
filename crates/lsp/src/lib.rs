pub mod capabilities;
pub mod goto;
pub mod hover;
pub mod util;

use ayla_core::{AnalysisError, DocumentStore};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    pub documents: DocumentStore,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
        }
    }

    /// Recompute and send the diagnostics of the current text of `uri`.
    async fn publish_diagnostics(&self, uri: Url) {
        let Some(document) = self.documents.get(uri.as_str()) else {
            return;
        };
        let diagnostics: Vec<Diagnostic> = ayla_core::diagnostics(&document.text)
            .iter()
            .map(util::to_lsp_diagnostic)
            .collect();
        tracing::debug!(%uri, count = diagnostics.len(), "publishing diagnostics");
        self.client
            .publish_diagnostics(uri, diagnostics, Some(document.version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(info) = &params.client_info {
            tracing::info!(client = %info.name, "initialize");
        }
        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "ayla-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Ayla language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!(open = self.documents.len(), "shutdown");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("LSP Event: did_open uri={}", uri))
            .await;
        self.documents.open(
            uri.as_str(),
            params.text_document.text,
            params.text_document.version,
        );
        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change carries the whole text.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        match self.documents.change(uri.as_str(), change.text.clone(), version) {
            Ok(()) => {}
            Err(AnalysisError::UnknownDocument(_)) => {
                tracing::warn!(%uri, "change for a document that was never opened");
                self.documents.open(uri.as_str(), change.text, version);
            }
            Err(err) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", err))
                    .await;
                return;
            }
        }
        self.publish_diagnostics(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("LSP Event: did_close uri={}", uri))
            .await;
        self.documents.close(uri.as_str());
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/hover uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = hover::hover(&self.documents, params);
        let message = if result.is_some() {
            "LSP Response: found hover content"
        } else {
            "LSP Response: no hover content"
        };
        self.client.log_message(MessageType::LOG, message).await;
        Ok(result)
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/definition uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = goto::definition(&self.documents, params);
        let message = if result.is_some() {
            "LSP Response: found 1 location"
        } else {
            "LSP Response: no definition found"
        };
        self.client.log_message(MessageType::LOG, message).await;
        Ok(result)
    }
}

/// Serve the protocol over stdin/stdout until the client exits.
pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(LspServer::new);
    tracing::info!("serving on stdio");
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
