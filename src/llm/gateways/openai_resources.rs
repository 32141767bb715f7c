//! Assistants and files endpoints on [`OpenAIGateway`].
//!
//! Each call is a thin pass-through: it returns the typed resource or a transport error.

use crate::error::Result;
use crate::llm::gateways::openai::OpenAIGateway;
use crate::llm::resources::{
    Assistant, AssistantCreate, AssistantFile, AssistantFileCreate, AssistantsRequest,
    AssistantsResult, Deleted, FileCreate, FileResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use tracing::{debug, info};

const BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_BETA: &str = "assistants=v1";

fn beta(request: RequestBuilder) -> RequestBuilder {
    request.header(BETA_HEADER, ASSISTANTS_BETA)
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl OpenAIGateway {
    pub async fn create_assistant(&self, assistant: &AssistantCreate) -> Result<Assistant> {
        info!("Creating assistant");
        self.send_json(beta(self.post("assistants")).json(assistant)).await
    }

    /// List assistants, returning the `data` page only.
    pub async fn list_assistants(&self, params: &AssistantsRequest) -> Result<Vec<Assistant>> {
        debug!("Listing assistants");
        let result: AssistantsResult =
            self.send_json(beta(self.get("assistants")).query(params)).await?;
        Ok(result.data)
    }

    pub async fn get_assistant(&self, id: &str) -> Result<Assistant> {
        debug!("Fetching assistant {}", id);
        self.send_json(beta(self.get(&format!("assistants/{}", segment(id))))).await
    }

    pub async fn update_assistant(&self, id: &str, assistant: &AssistantCreate) -> Result<Assistant> {
        info!("Updating assistant {}", id);
        let path = format!("assistants/{}", segment(id));
        self.send_json(beta(self.post(&path)).json(assistant)).await
    }

    pub async fn delete_assistant(&self, id: &str) -> Result<Deleted> {
        info!("Deleting assistant {}", id);
        self.send_json(beta(self.delete(&format!("assistants/{}", segment(id))))).await
    }

    /// Attach an uploaded file to an assistant.
    pub async fn create_assistant_file(&self, file: &AssistantFileCreate) -> Result<AssistantFile> {
        info!("Attaching file {} to assistant {}", file.file_id, file.assistant_id);
        let path = format!("assistants/{}/files", segment(&file.assistant_id));
        self.send_json(beta(self.post(&path)).json(file)).await
    }

    pub async fn remove_assistant_file(&self, assistant_id: &str, file_id: &str) -> Result<Deleted> {
        info!("Removing file {} from assistant {}", file_id, assistant_id);
        let path = format!("assistants/{}/files/{}", segment(assistant_id), segment(file_id));
        self.send_json(beta(self.delete(&path))).await
    }

    /// Upload a file as multipart form data.
    pub async fn create_file(&self, file: FileCreate) -> Result<FileResponse> {
        info!("Uploading file {} ({} bytes)", file.filename, file.bytes.len());
        let form = Form::new()
            .text("purpose", file.purpose)
            .part("file", Part::bytes(file.bytes).file_name(file.filename));
        self.send_json(self.post("files").multipart(form)).await
    }

    pub async fn get_file(&self, id: &str) -> Result<FileResponse> {
        debug!("Fetching file {}", id);
        self.send_json(self.get(&format!("files/{}", segment(id)))).await
    }

    pub async fn delete_file(&self, id: &str) -> Result<Deleted> {
        info!("Deleting file {}", id);
        self.send_json(self.delete(&format!("files/{}", segment(id)))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ColloquyError, TransportError};
    use mockito::Matcher;

    const ASSISTANT_JSON: &str = r#"{
        "id": "asst_1",
        "object": "assistant",
        "created_at": 1699009709,
        "name": "Tutor",
        "model": "gpt-4",
        "instructions": "Teach maths",
        "tools": [{"type": "code_interpreter"}],
        "file_ids": []
    }"#;

    fn gateway(server: &mockito::Server) -> OpenAIGateway {
        OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_create_assistant() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/assistants")
            .match_header("openai-beta", "assistants=v1")
            .match_body(Matcher::Json(serde_json::json!({"model": "gpt-4", "name": "Tutor"})))
            .with_status(200)
            .with_body(ASSISTANT_JSON)
            .create_async()
            .await;

        let body = AssistantCreate::new("gpt-4").with_name("Tutor");
        let assistant = gateway(&server).create_assistant(&body).await.unwrap();

        mock.assert_async().await;
        assert_eq!(assistant.id, "asst_1");
        assert_eq!(assistant.instructions.as_deref(), Some("Teach maths"));
    }

    #[tokio::test]
    async fn test_list_assistants_passes_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/assistants")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "2".into()),
                Matcher::UrlEncoded("order".into(), "asc".into()),
            ]))
            .with_status(200)
            .with_body(format!(
                r#"{{"object":"list","data":[{ASSISTANT_JSON}],"first_id":"asst_1","last_id":"asst_1","has_more":false}}"#
            ))
            .create_async()
            .await;

        let params = AssistantsRequest {
            limit: Some(2),
            order: Some("asc".to_string()),
            ..Default::default()
        };
        let assistants = gateway(&server).list_assistants(&params).await.unwrap();

        mock.assert_async().await;
        assert_eq!(assistants.len(), 1);
        assert_eq!(assistants[0].model, "gpt-4");
    }

    #[tokio::test]
    async fn test_get_and_update_assistant() {
        let mut server = mockito::Server::new_async().await;
        let get = server
            .mock("GET", "/assistants/asst_1")
            .with_status(200)
            .with_body(ASSISTANT_JSON)
            .create_async()
            .await;
        let update = server
            .mock("POST", "/assistants/asst_1")
            .match_body(Matcher::PartialJson(serde_json::json!({"instructions": "Be kind"})))
            .with_status(200)
            .with_body(ASSISTANT_JSON)
            .create_async()
            .await;

        let gateway = gateway(&server);
        gateway.get_assistant("asst_1").await.unwrap();
        gateway
            .update_assistant("asst_1", &AssistantCreate::new("gpt-4").with_instructions("Be kind"))
            .await
            .unwrap();

        get.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_assistant() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/assistants/asst_1")
            .with_status(200)
            .with_body(r#"{"id":"asst_1","object":"assistant.deleted","deleted":true}"#)
            .create_async()
            .await;

        let deleted = gateway(&server).delete_assistant("asst_1").await.unwrap();

        mock.assert_async().await;
        assert!(deleted.deleted);
        assert_eq!(deleted.object, "assistant.deleted");
    }

    #[tokio::test]
    async fn test_assistant_files() {
        let mut server = mockito::Server::new_async().await;
        let attach = server
            .mock("POST", "/assistants/asst_1/files")
            .match_body(Matcher::Json(serde_json::json!({"file_id": "file-9"})))
            .with_status(200)
            .with_body(
                r#"{"id":"file-9","object":"assistant.file","created_at":1,"assistant_id":"asst_1"}"#,
            )
            .create_async()
            .await;
        let detach = server
            .mock("DELETE", "/assistants/asst_1/files/file-9")
            .with_status(200)
            .with_body(r#"{"id":"file-9","object":"assistant.file.deleted","deleted":true}"#)
            .create_async()
            .await;

        let gateway = gateway(&server);
        let file = gateway
            .create_assistant_file(&AssistantFileCreate {
                assistant_id: "asst_1".to_string(),
                file_id: "file-9".to_string(),
            })
            .await
            .unwrap();
        let deleted = gateway.remove_assistant_file("asst_1", "file-9").await.unwrap();

        attach.assert_async().await;
        detach.assert_async().await;
        assert_eq!(file.assistant_id, "asst_1");
        assert!(deleted.deleted);
    }

    #[tokio::test]
    async fn test_file_lifecycle() {
        let mut server = mockito::Server::new_async().await;
        let file_json = r#"{"id":"file-1","object":"file","bytes":12,"created_at":1,"filename":"data.jsonl","purpose":"fine-tune"}"#;
        let upload = server
            .mock("POST", "/files")
            .match_header("content-type", Matcher::Regex("multipart/form-data".to_string()))
            .match_body(Matcher::Regex("fine-tune".to_string()))
            .with_status(200)
            .with_body(file_json)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/files/file-1")
            .with_status(200)
            .with_body(file_json)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/files/file-1")
            .with_status(200)
            .with_body(r#"{"id":"file-1","object":"file","deleted":true}"#)
            .create_async()
            .await;

        let gateway = gateway(&server);
        let created = gateway
            .create_file(FileCreate::new("data.jsonl", b"{\"a\":1}\n".to_vec(), "fine-tune"))
            .await
            .unwrap();
        let fetched = gateway.get_file("file-1").await.unwrap();
        let deleted = gateway.delete_file("file-1").await.unwrap();

        upload.assert_async().await;
        get.assert_async().await;
        delete.assert_async().await;
        assert_eq!(created, fetched);
        assert_eq!(fetched.filename, "data.jsonl");
        assert!(deleted.deleted);
    }

    #[tokio::test]
    async fn test_ids_are_percent_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files/a%2Fb")
            .with_status(404)
            .with_body("missing")
            .create_async()
            .await;

        let result = gateway(&server).get_file("a/b").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ColloquyError::Transport(TransportError::Api { status: 404, .. }))
        ));
    }
}
