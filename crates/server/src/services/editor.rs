//! Section Editor: the authenticated write path for content sections and
//! catalog entities.
//!
//! Every successful store write is followed by a revision append. The
//! ordering is strict - store write happens-before log append - and the
//! append is best-effort: a failed revision insert is logged and swallowed,
//! because visible content must never be blocked by a history failure. A
//! failed store write, by contrast, appends nothing and propagates.
//!
//! The editor drives its writes through [`EditorStore`] so the protocol
//! can be pinned down in tests against an in-memory store; production
//! code uses the Postgres implementation via [`SectionEditor::new`].

use serde_json::Value as JsonValue;
use sqlx::PgPool;
use thiserror::Error;

use ruhiya_core::{SectionKey, ServiceId, TestimonialId};

use crate::db::{
    ContentRepository, RepositoryError, RevisionRepository, ServiceRepository,
    TestimonialRepository,
};
use crate::models::{
    ContentSection, NewService, NewTestimonial, SectionFields, Service, ServicePatch, Testimonial,
    TestimonialPatch,
};

/// Errors from the Section Editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Missing or malformed required fields; nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist; nothing was written.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Storage operations the editor drives.
///
/// The revision append is separated from the entity writes so the editor
/// owns the ordering between them.
#[allow(async_fn_in_trait)]
pub trait EditorStore {
    async fn upsert_section(
        &self,
        key: &SectionKey,
        fields: &SectionFields,
    ) -> Result<ContentSection, RepositoryError>;

    async fn create_service(&self, new: &NewService) -> Result<Service, RepositoryError>;

    async fn update_service(
        &self,
        id: ServiceId,
        patch: &ServicePatch,
    ) -> Result<Service, RepositoryError>;

    async fn delete_service(&self, id: ServiceId) -> Result<(), RepositoryError>;

    async fn create_testimonial(
        &self,
        new: &NewTestimonial,
    ) -> Result<Testimonial, RepositoryError>;

    async fn update_testimonial(
        &self,
        id: TestimonialId,
        patch: &TestimonialPatch,
    ) -> Result<Testimonial, RepositoryError>;

    async fn delete_testimonial(&self, id: TestimonialId) -> Result<(), RepositoryError>;

    async fn append_revision(
        &self,
        section: &str,
        reference_id: Option<i32>,
        content: &JsonValue,
        updated_by: &str,
    ) -> Result<(), RepositoryError>;
}

/// Postgres-backed [`EditorStore`], delegating to the repositories.
pub struct PgEditorStore<'a> {
    content: ContentRepository<'a>,
    services: ServiceRepository<'a>,
    testimonials: TestimonialRepository<'a>,
    revisions: RevisionRepository<'a>,
}

impl<'a> PgEditorStore<'a> {
    /// Create a Postgres editor store over the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            content: ContentRepository::new(pool),
            services: ServiceRepository::new(pool),
            testimonials: TestimonialRepository::new(pool),
            revisions: RevisionRepository::new(pool),
        }
    }
}

impl EditorStore for PgEditorStore<'_> {
    async fn upsert_section(
        &self,
        key: &SectionKey,
        fields: &SectionFields,
    ) -> Result<ContentSection, RepositoryError> {
        self.content.upsert(key, fields).await
    }

    async fn create_service(&self, new: &NewService) -> Result<Service, RepositoryError> {
        self.services.create(new).await
    }

    async fn update_service(
        &self,
        id: ServiceId,
        patch: &ServicePatch,
    ) -> Result<Service, RepositoryError> {
        self.services.update(id, patch).await
    }

    async fn delete_service(&self, id: ServiceId) -> Result<(), RepositoryError> {
        self.services.delete(id).await
    }

    async fn create_testimonial(
        &self,
        new: &NewTestimonial,
    ) -> Result<Testimonial, RepositoryError> {
        self.testimonials.create(new).await
    }

    async fn update_testimonial(
        &self,
        id: TestimonialId,
        patch: &TestimonialPatch,
    ) -> Result<Testimonial, RepositoryError> {
        self.testimonials.update(id, patch).await
    }

    async fn delete_testimonial(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        self.testimonials.delete(id).await
    }

    async fn append_revision(
        &self,
        section: &str,
        reference_id: Option<i32>,
        content: &JsonValue,
        updated_by: &str,
    ) -> Result<(), RepositoryError> {
        self.revisions
            .append(section, reference_id, content, updated_by)
            .await
            .map(|_| ())
    }
}

/// The component that applies authenticated edits: upsert/insert into the
/// appropriate store, then append a snapshot to the revision log.
pub struct SectionEditor<S> {
    store: S,
}

impl<'a> SectionEditor<PgEditorStore<'a>> {
    /// Create a new section editor over the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            store: PgEditorStore::new(pool),
        }
    }
}

impl<S: EditorStore> SectionEditor<S> {
    /// Create a section editor over an explicit store.
    #[must_use]
    pub const fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Upsert a named content section and record a revision.
    ///
    /// All four fields are replaced (or the section is created with them);
    /// there are no partial-merge semantics here - the caller submits the
    /// full object.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Repository` if the upsert fails; in that case
    /// no revision is appended.
    pub async fn put_section(
        &self,
        key: &SectionKey,
        fields: &SectionFields,
        updated_by: &str,
    ) -> Result<ContentSection, EditorError> {
        let section = self.store.upsert_section(key, fields).await?;

        self.append_revision(
            key.as_str(),
            Some(section.id.as_i32()),
            serde_json::to_value(fields),
            updated_by,
        )
        .await;

        Ok(section)
    }

    /// Create a service and record a revision.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` if the title is empty, or
    /// `EditorError::Repository` if the insert fails.
    pub async fn create_service(
        &self,
        new: &NewService,
        updated_by: &str,
    ) -> Result<Service, EditorError> {
        validate_new_service(new)?;

        let service = self.store.create_service(new).await?;

        self.append_revision(
            SectionKey::SERVICES,
            Some(service.id.as_i32()),
            serde_json::to_value(new),
            updated_by,
        )
        .await;

        Ok(service)
    }

    /// Apply a partial update to a service and record a revision.
    ///
    /// Only fields present in the patch overwrite stored values. If the id
    /// is unknown, nothing is written and no revision is appended.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NotFound` if the service doesn't exist, or
    /// `EditorError::Repository` on store failure.
    pub async fn update_service(
        &self,
        id: ServiceId,
        patch: &ServicePatch,
        updated_by: &str,
    ) -> Result<Service, EditorError> {
        validate_service_patch(patch)?;

        let service = self
            .store
            .update_service(id, patch)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EditorError::NotFound("Service"),
                other => EditorError::Repository(other),
            })?;

        self.append_revision(
            SectionKey::SERVICES,
            Some(service.id.as_i32()),
            serde_json::to_value(patch),
            updated_by,
        )
        .await;

        Ok(service)
    }

    /// Delete a service permanently.
    ///
    /// Deletes are not versioned: no revision is appended, matching the
    /// rest of the history model (see DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NotFound` if the service doesn't exist, or
    /// `EditorError::Repository` on store failure.
    pub async fn delete_service(&self, id: ServiceId) -> Result<(), EditorError> {
        self.store.delete_service(id).await.map_err(|e| match e {
            RepositoryError::NotFound => EditorError::NotFound("Service"),
            other => EditorError::Repository(other),
        })
    }

    /// Create a testimonial and record a revision.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` if name or text is empty, or
    /// `EditorError::Repository` if the insert fails.
    pub async fn create_testimonial(
        &self,
        new: &NewTestimonial,
        updated_by: &str,
    ) -> Result<Testimonial, EditorError> {
        validate_new_testimonial(new)?;

        let testimonial = self.store.create_testimonial(new).await?;

        self.append_revision(
            SectionKey::TESTIMONIALS,
            Some(testimonial.id.as_i32()),
            serde_json::to_value(new),
            updated_by,
        )
        .await;

        Ok(testimonial)
    }

    /// Apply a partial update to a testimonial and record a revision.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NotFound` if the testimonial doesn't exist,
    /// or `EditorError::Repository` on store failure.
    pub async fn update_testimonial(
        &self,
        id: TestimonialId,
        patch: &TestimonialPatch,
        updated_by: &str,
    ) -> Result<Testimonial, EditorError> {
        validate_testimonial_patch(patch)?;

        let testimonial = self
            .store
            .update_testimonial(id, patch)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EditorError::NotFound("Testimonial"),
                other => EditorError::Repository(other),
            })?;

        self.append_revision(
            SectionKey::TESTIMONIALS,
            Some(testimonial.id.as_i32()),
            serde_json::to_value(patch),
            updated_by,
        )
        .await;

        Ok(testimonial)
    }

    /// Delete a testimonial permanently. No revision is appended.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NotFound` if the testimonial doesn't exist,
    /// or `EditorError::Repository` on store failure.
    pub async fn delete_testimonial(&self, id: TestimonialId) -> Result<(), EditorError> {
        self.store
            .delete_testimonial(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EditorError::NotFound("Testimonial"),
                other => EditorError::Repository(other),
            })
    }

    /// Best-effort revision append after a successful store write.
    ///
    /// The edit already succeeded; a history failure is logged for
    /// operational visibility but never surfaced to the caller.
    async fn append_revision(
        &self,
        section: &str,
        reference_id: Option<i32>,
        content: Result<JsonValue, serde_json::Error>,
        updated_by: &str,
    ) {
        let content = match content {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(section, error = %e, "Failed to serialize revision snapshot");
                return;
            }
        };

        if let Err(e) = self
            .store
            .append_revision(section, reference_id, &content, updated_by)
            .await
        {
            tracing::warn!(
                section,
                reference_id,
                error = %e,
                "Content write succeeded but revision append failed"
            );
        }
    }
}

fn validate_new_service(new: &NewService) -> Result<(), EditorError> {
    if new.title.trim().is_empty() {
        return Err(EditorError::Validation("Title is required".to_string()));
    }
    Ok(())
}

fn validate_service_patch(patch: &ServicePatch) -> Result<(), EditorError> {
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(EditorError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_new_testimonial(new: &NewTestimonial) -> Result<(), EditorError> {
    if new.name.trim().is_empty() {
        return Err(EditorError::Validation("Name is required".to_string()));
    }
    if new.text.trim().is_empty() {
        return Err(EditorError::Validation("Text is required".to_string()));
    }
    Ok(())
}

fn validate_testimonial_patch(patch: &TestimonialPatch) -> Result<(), EditorError> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(EditorError::Validation("Name cannot be empty".to_string()));
    }
    if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(EditorError::Validation("Text cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use ruhiya_core::ContentSectionId;

    use super::*;

    fn service(title: &str) -> NewService {
        NewService {
            title: title.to_string(),
            subtitle: String::new(),
            description: String::new(),
            image_url: String::new(),
            sort_order: 0,
        }
    }

    #[test]
    fn test_new_service_requires_title() {
        assert!(matches!(
            validate_new_service(&service("")),
            Err(EditorError::Validation(_))
        ));
        assert!(matches!(
            validate_new_service(&service("   ")),
            Err(EditorError::Validation(_))
        ));
        assert!(validate_new_service(&service("Therapy A")).is_ok());
    }

    #[test]
    fn test_service_patch_allows_absent_title() {
        // A patch that doesn't touch the title is valid
        let patch = ServicePatch {
            description: Some("new text".to_string()),
            ..ServicePatch::default()
        };
        assert!(validate_service_patch(&patch).is_ok());
    }

    #[test]
    fn test_service_patch_rejects_blank_title() {
        let patch = ServicePatch {
            title: Some("  ".to_string()),
            ..ServicePatch::default()
        };
        assert!(matches!(
            validate_service_patch(&patch),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_new_testimonial_requires_name_and_text() {
        let missing_text = NewTestimonial {
            name: "A. Client".to_string(),
            service_label: String::new(),
            text: String::new(),
            image_url: String::new(),
        };
        assert!(matches!(
            validate_new_testimonial(&missing_text),
            Err(EditorError::Validation(_))
        ));

        let valid = NewTestimonial {
            name: "A. Client".to_string(),
            service_label: String::new(),
            text: "Life changing.".to_string(),
            image_url: String::new(),
        };
        assert!(validate_new_testimonial(&valid).is_ok());
    }

    #[test]
    fn test_patch_snapshot_holds_only_submitted_fields() {
        // The revision snapshot for an update is the submitted fields, not
        // the merged record
        let patch = ServicePatch {
            description: Some("new text".to_string()),
            ..ServicePatch::default()
        };
        let snapshot = serde_json::to_value(&patch).unwrap();
        assert_eq!(snapshot, serde_json::json!({"description": "new text"}));
    }

    // In-memory store for pinning down the write-then-log protocol.
    // Cloning shares state, so tests keep a handle for inspection after
    // handing the store to the editor.

    #[derive(Default)]
    struct FakeState {
        calls: Mutex<Vec<&'static str>>,
        // section key -> row id, emulating the unique constraint
        sections: Mutex<HashMap<String, i32>>,
        revisions: Mutex<Vec<(String, Option<i32>, JsonValue)>>,
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        state: Arc<FakeState>,
        fail_upsert: bool,
        fail_append: bool,
        missing_entity: bool,
    }

    impl FakeStore {
        fn calls(&self) -> Vec<&'static str> {
            self.state.calls.lock().unwrap().clone()
        }

        fn revisions(&self) -> Vec<(String, Option<i32>, JsonValue)> {
            self.state.revisions.lock().unwrap().clone()
        }

        fn section_count(&self) -> usize {
            self.state.sections.lock().unwrap().len()
        }

        fn db_error() -> RepositoryError {
            RepositoryError::Database(sqlx::Error::PoolClosed)
        }

        fn some_service() -> Service {
            Service {
                id: ServiceId::new(1),
                title: "Therapy A".to_string(),
                subtitle: String::new(),
                description: String::new(),
                image_url: String::new(),
                sort_order: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        }

        fn some_testimonial() -> Testimonial {
            Testimonial {
                id: TestimonialId::new(1),
                name: "A. Client".to_string(),
                service_label: String::new(),
                text: "Life changing.".to_string(),
                image_url: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        }
    }

    impl EditorStore for FakeStore {
        async fn upsert_section(
            &self,
            key: &SectionKey,
            fields: &SectionFields,
        ) -> Result<ContentSection, RepositoryError> {
            self.state.calls.lock().unwrap().push("upsert_section");
            if self.fail_upsert {
                return Err(Self::db_error());
            }

            let mut sections = self.state.sections.lock().unwrap();
            let next_id = i32::try_from(sections.len()).unwrap() + 1;
            let id = *sections.entry(key.as_str().to_string()).or_insert(next_id);

            Ok(ContentSection {
                id: ContentSectionId::new(id),
                section: key.clone(),
                title: fields.title.clone(),
                subtitle: fields.subtitle.clone(),
                body: fields.body.clone(),
                image_url: fields.image_url.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn create_service(&self, new: &NewService) -> Result<Service, RepositoryError> {
            self.state.calls.lock().unwrap().push("create_service");
            Ok(Service {
                title: new.title.clone(),
                ..Self::some_service()
            })
        }

        async fn update_service(
            &self,
            _id: ServiceId,
            _patch: &ServicePatch,
        ) -> Result<Service, RepositoryError> {
            self.state.calls.lock().unwrap().push("update_service");
            if self.missing_entity {
                return Err(RepositoryError::NotFound);
            }
            Ok(Self::some_service())
        }

        async fn delete_service(&self, _id: ServiceId) -> Result<(), RepositoryError> {
            self.state.calls.lock().unwrap().push("delete_service");
            if self.missing_entity {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }

        async fn create_testimonial(
            &self,
            new: &NewTestimonial,
        ) -> Result<Testimonial, RepositoryError> {
            self.state.calls.lock().unwrap().push("create_testimonial");
            Ok(Testimonial {
                name: new.name.clone(),
                ..Self::some_testimonial()
            })
        }

        async fn update_testimonial(
            &self,
            _id: TestimonialId,
            _patch: &TestimonialPatch,
        ) -> Result<Testimonial, RepositoryError> {
            self.state.calls.lock().unwrap().push("update_testimonial");
            if self.missing_entity {
                return Err(RepositoryError::NotFound);
            }
            Ok(Self::some_testimonial())
        }

        async fn delete_testimonial(&self, _id: TestimonialId) -> Result<(), RepositoryError> {
            self.state.calls.lock().unwrap().push("delete_testimonial");
            if self.missing_entity {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }

        async fn append_revision(
            &self,
            section: &str,
            reference_id: Option<i32>,
            content: &JsonValue,
            _updated_by: &str,
        ) -> Result<(), RepositoryError> {
            self.state.calls.lock().unwrap().push("append_revision");
            if self.fail_append {
                return Err(Self::db_error());
            }
            self.state.revisions.lock().unwrap().push((
                section.to_string(),
                reference_id,
                content.clone(),
            ));
            Ok(())
        }
    }

    fn fields(title: &str) -> SectionFields {
        SectionFields {
            title: title.to_string(),
            ..SectionFields::default()
        }
    }

    #[tokio::test]
    async fn test_store_write_happens_before_revision_append() {
        let store = FakeStore::default();
        let editor = SectionEditor::with_store(store.clone());
        let key = SectionKey::parse("about").unwrap();

        editor.put_section(&key, &fields("Hello"), "Admin").await.unwrap();

        assert_eq!(store.calls(), vec!["upsert_section", "append_revision"]);
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_section_and_two_revisions() {
        let store = FakeStore::default();
        let editor = SectionEditor::with_store(store.clone());
        let key = SectionKey::parse("about").unwrap();

        let first = editor.put_section(&key, &fields("One"), "Admin").await.unwrap();
        let second = editor.put_section(&key, &fields("Two"), "Admin").await.unwrap();

        // Same logical row both times
        assert_eq!(first.id, second.id);
        assert_eq!(store.section_count(), 1);

        // One revision per edit, each snapshotting the submitted fields
        let revisions = store.revisions();
        assert_eq!(revisions.len(), 2);
        assert_eq!(revisions[0].1, Some(first.id.as_i32()));
        assert_eq!(revisions[0].2["title"], "One");
        assert_eq!(revisions[1].2["title"], "Two");
    }

    #[tokio::test]
    async fn test_revision_append_failure_does_not_fail_the_edit() {
        let store = FakeStore {
            fail_append: true,
            ..FakeStore::default()
        };
        let editor = SectionEditor::with_store(store.clone());
        let key = SectionKey::parse("hero").unwrap();

        let result = editor.put_section(&key, &fields("Hello"), "Admin").await;

        assert!(result.is_ok());
        assert!(store.revisions().is_empty());
        // The append was attempted after the write, then swallowed
        assert_eq!(store.calls(), vec!["upsert_section", "append_revision"]);
    }

    #[tokio::test]
    async fn test_failed_upsert_appends_no_revision() {
        let store = FakeStore {
            fail_upsert: true,
            ..FakeStore::default()
        };
        let editor = SectionEditor::with_store(store.clone());
        let key = SectionKey::parse("hero").unwrap();

        let result = editor.put_section(&key, &fields("Hello"), "Admin").await;

        assert!(matches!(result, Err(EditorError::Repository(_))));
        assert_eq!(store.calls(), vec!["upsert_section"]);
        assert!(store.revisions().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_missing_service_appends_no_revision() {
        let store = FakeStore {
            missing_entity: true,
            ..FakeStore::default()
        };
        let editor = SectionEditor::with_store(store.clone());

        let patch = ServicePatch {
            title: Some("New title".to_string()),
            ..ServicePatch::default()
        };
        let result = editor
            .update_service(ServiceId::new(99), &patch, "Admin")
            .await;

        assert!(matches!(result, Err(EditorError::NotFound("Service"))));
        assert_eq!(store.calls(), vec!["update_service"]);
        assert!(store.revisions().is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_revision_with_catalog_tag() {
        let store = FakeStore::default();
        let editor = SectionEditor::with_store(store.clone());

        editor
            .create_service(&service("Therapy A"), "Admin")
            .await
            .unwrap();

        let revisions = store.revisions();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].0, SectionKey::SERVICES);
        assert_eq!(revisions[0].1, Some(1));
    }

    #[tokio::test]
    async fn test_delete_appends_no_revision() {
        let store = FakeStore::default();
        let editor = SectionEditor::with_store(store.clone());

        editor.delete_service(ServiceId::new(1)).await.unwrap();
        editor
            .delete_testimonial(TestimonialId::new(1))
            .await
            .unwrap();

        assert_eq!(store.calls(), vec!["delete_service", "delete_testimonial"]);
        assert!(store.revisions().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let store = FakeStore::default();
        let editor = SectionEditor::with_store(store.clone());

        let result = editor.create_service(&service("  "), "Admin").await;

        assert!(matches!(result, Err(EditorError::Validation(_))));
        assert!(store.calls().is_empty());
    }
}
