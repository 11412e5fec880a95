// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog endpoints.
//!
//! Reads are public. Mutations take [`BearerHeader`] as their first
//! extractor, so a missing or malformed header is refused before the path or
//! body is parsed. The raw header then goes to the authorization service,
//! which decides token, identity, role and ownership failures before the
//! store is touched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::BearerHeader,
    authz::{AuthzError, Operation},
    error::ApiError,
    models::{BookRequest, ContentItem},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book identifier")),
    tag = "Books",
    responses(
        (status = 200, body = ContentItem),
        (status = 404, description = "Book not found"),
    )
)]
pub async fn get_book(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ContentItem>, ApiError> {
    state
        .service
        .content()
        .find_by_id(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Book not found!"))
}

#[utoipa::path(
    post,
    path = "/v1/books",
    request_body = BookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 201, body = ContentItem),
        (status = 401, description = "Not allowed to add this book"),
        (status = 409, description = "Same title by the same author exists"),
    )
)]
pub async fn create_book(
    BearerHeader(header): BearerHeader,
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<ContentItem>), AuthzError> {
    let item = ContentItem::from_request(Uuid::new_v4(), request);

    let created = state.service.authorize_header(&header, Operation::Add, item)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book identifier")),
    request_body = BookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 200, body = ContentItem),
        (status = 401, description = "Not allowed to edit this book"),
        (status = 404, description = "Book not found"),
    )
)]
pub async fn update_book(
    BearerHeader(header): BearerHeader,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<Json<ContentItem>, AuthzError> {
    let item = ContentItem::from_request(id, request);

    let updated = state.service.authorize_header(&header, Operation::Edit, item)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/v1/books/{id}",
    params(("id" = Uuid, Path, description = "Book identifier")),
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Only admins may delete books"),
        (status = 404, description = "Book not found"),
    )
)]
pub async fn delete_book(
    BearerHeader(header): BearerHeader,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AuthzError> {
    // Only admins pass the role gate and they skip ownership, so the id is
    // all the gates need. The terminal action reads the stored entry.
    let item = ContentItem::reference(id);

    state.service.authorize_header(&header, Operation::Delete, item)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{test_state, TestState};
    use crate::store::ContentStore;

    fn bearer(token: &str) -> BearerHeader {
        BearerHeader(format!("Bearer {token}"))
    }

    fn book(title: &str, authors: &[&str]) -> BookRequest {
        BookRequest {
            title: title.to_string(),
            author_names: authors.iter().map(|a| a.to_string()).collect(),
            description: None,
            published_year: Some(2021),
        }
    }

    #[tokio::test]
    async fn author_creates_own_book() {
        let TestState { state, content, tokens, .. } = test_state();

        let (status, Json(created)) = create_book(
            bearer(&tokens.alice),
            State(state.clone()),
            Json(book("Book A", &["Alice Writer"])),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.title, "Book A");
        assert_eq!(created.published_year, Some(2021));
        assert_eq!(content.list(), vec![created.clone()]);

        let Json(fetched) = get_book(Path(created.id), State(state)).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn well_formed_header_with_bad_token_is_refused() {
        let TestState { state, content, .. } = test_state();

        let err = create_book(
            BearerHeader("Bearer not.a.token".to_string()),
            State(state),
            Json(book("Book A", &["x"])),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthzError::TokenMalformed));
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn regular_user_cannot_create() {
        let TestState { state, content, tokens, .. } = test_state();

        let err = create_book(
            bearer(&tokens.bob),
            State(state),
            Json(book("Book A", &["Bob Reader"])),
        )
        .await
        .unwrap_err();

        match err {
            AuthzError::Unauthorized(msg) => {
                assert_eq!(msg, "Only authors and admins may add books!")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn author_cannot_edit_someone_elses_book() {
        let TestState { state, content, tokens, .. } = test_state();
        let theirs = ContentItem::new("Book B", ["Bob Other"]);
        content.save(&theirs).unwrap();

        let err = update_book(
            bearer(&tokens.alice),
            Path(theirs.id),
            State(state),
            Json(book("Book B", &["Bob Other"])),
        )
        .await
        .unwrap_err();

        match err {
            AuthzError::Unauthorized(msg) => {
                assert_eq!(msg, "Only the authors of the book may edit it!")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(content.find_by_id(theirs.id).unwrap(), Some(theirs));
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let TestState { state, tokens, .. } = test_state();

        let err = update_book(
            bearer(&tokens.alice),
            Path(Uuid::new_v4()),
            State(state),
            Json(book("Book A", &["Alice Writer"])),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_admin_deletes() {
        let TestState { state, content, tokens, .. } = test_state();
        let mine = ContentItem::new("Book A", ["Alice Writer"]);
        content.save(&mine).unwrap();

        let err = delete_book(bearer(&tokens.alice), Path(mine.id), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only admins may delete books!");
        assert_eq!(content.len(), 1);

        let status = delete_book(bearer(&tokens.root), Path(mine.id), State(state))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_book_checks_role_first() {
        let TestState { state, tokens, .. } = test_state();
        let id = Uuid::new_v4();

        let err = delete_book(bearer(&tokens.alice), Path(id), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = delete_book(bearer(&tokens.root), Path(id), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_missing_book_is_not_found() {
        let TestState { state, .. } = test_state();

        let err = get_book(Path(Uuid::new_v4()), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
