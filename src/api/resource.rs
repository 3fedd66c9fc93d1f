//! CRUD helpers for one REST collection such as `/cursos`

use super::{crud_method, ApiError, Client, CredentialProvider, Payload, RequestPayload, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: String,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// One page of the collection, pages counted from 0
    pub fn list<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        page: u32,
        size: u32,
    ) -> Result<Payload, ApiError> {
        client.request(
            &self.path,
            crud_method('R')?,
            &RequestPayload::new(),
            &[("page", page.to_string()), ("size", size.to_string())],
        )
    }

    pub fn get<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        id: &str,
    ) -> Result<Payload, ApiError> {
        client.request(&self.item(id), crud_method('R')?, &RequestPayload::new(), &[])
    }

    /// Items related to another entity, e.g. `/cursos/periodo/{id}`
    pub fn find_by<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        relation: &str,
        id: &str,
    ) -> Result<Payload, ApiError> {
        let endpoint = format!("{}/{}/{}", self.path, relation, id);
        client.request(&endpoint, crud_method('R')?, &RequestPayload::new(), &[])
    }

    pub fn create<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        payload: &RequestPayload,
    ) -> Result<Payload, ApiError> {
        client.request(&self.path, crud_method('C')?, payload, &[])
    }

    pub fn update<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        id: &str,
        payload: &RequestPayload,
    ) -> Result<Payload, ApiError> {
        client.request(&self.item(id), crud_method('U')?, payload, &[])
    }

    pub fn delete<T: Transport, C: CredentialProvider>(
        &self,
        client: &mut Client<T, C>,
        id: &str,
    ) -> Result<Payload, ApiError> {
        client.request(&self.item(id), crud_method('D')?, &RequestPayload::new(), &[])
    }

    fn item(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::CannedTransport;
    use crate::api::{ApiConfig, ApiResponse, RequestBody};
    use http::{Method, StatusCode};
    use serde_json::json;

    fn client() -> Client<CannedTransport, Option<String>> {
        Client::new(
            ApiConfig::new("http://localhost:8080/api").expect("valid URL"),
            CannedTransport::new(ApiResponse::json(StatusCode::OK, &json!({ "content": [] }))),
            None,
        )
    }

    #[test]
    fn test_endpoints_and_methods() {
        let courses = Resource::new("/cursos");
        let mut client = client();
        let body = RequestPayload::new().field("grupo", "1A");

        courses.list(&mut client, 2, 20).expect("list");
        courses.get(&mut client, "7").expect("get");
        courses.find_by(&mut client, "periodo", "3").expect("find_by");
        courses.create(&mut client, &body).expect("create");
        courses.update(&mut client, "7", &body).expect("update");
        courses.delete(&mut client, "7").expect("delete");

        let sent: Vec<(Method, String)> = client
            .transport()
            .sent
            .iter()
            .map(|r| (r.method.clone(), r.url.to_string()))
            .collect();

        assert_eq!(
            sent,
            vec![
                (Method::GET, "http://localhost:8080/api/cursos?page=2&size=20".to_string()),
                (Method::GET, "http://localhost:8080/api/cursos/7".to_string()),
                (Method::GET, "http://localhost:8080/api/cursos/periodo/3".to_string()),
                (Method::POST, "http://localhost:8080/api/cursos".to_string()),
                (Method::PUT, "http://localhost:8080/api/cursos/7".to_string()),
                (Method::DELETE, "http://localhost:8080/api/cursos/7".to_string()),
            ]
        );
        assert!(matches!(client.transport().sent[3].body, RequestBody::Json(_)));
    }
}
