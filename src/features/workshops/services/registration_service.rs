//! Registration flow: normalize, reject duplicates, store, notify.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::core::error::{AppError, Result};
use crate::features::notifications::RegistrationNotifier;
use crate::features::workshops::dtos::{CreateRegistrationDto, RegistrationResponseDto};
use crate::features::workshops::models::NewRegistration;
use crate::features::workshops::services::registration_repository::{
    RegistrationRepository, DUPLICATE_REGISTRATION_MESSAGE,
};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{normalize_email, normalize_person_name, normalize_phone, FieldErrors};

/// A stored registration and its confirmation email task
pub struct Registered {
    pub registration: RegistrationResponseDto,
    /// Detached notification; resolves to whether the email was sent.
    /// Dropping the handle does not cancel the task.
    pub notification: JoinHandle<bool>,
}

pub struct RegistrationService {
    repository: Arc<dyn RegistrationRepository>,
    notifier: Arc<dyn RegistrationNotifier>,
}

impl RegistrationService {
    pub fn new(
        repository: Arc<dyn RegistrationRepository>,
        notifier: Arc<dyn RegistrationNotifier>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Register someone for a workshop.
    ///
    /// Field problems are reported together; an existing `(workshop, email)`
    /// registration is a client error and nothing is written or sent.
    pub async fn register(&self, dto: CreateRegistrationDto) -> Result<Registered> {
        let mut errors = FieldErrors::new();
        let user_name = errors.capture("user_name", normalize_person_name(&dto.user_name));
        let user_email = errors.capture("user_email", normalize_email(&dto.user_email));
        let phone_number = errors.capture(
            "phone_number",
            normalize_phone(dto.phone_number.as_deref()),
        );

        let workshop = self.repository.find_workshop(dto.workshop).await?;
        if workshop.is_none() {
            errors.add(
                "workshop",
                format!("Workshop {} does not exist.", dto.workshop),
            );
        }

        let (workshop, user_name, user_email, phone_number) =
            match (workshop, user_name, user_email, phone_number) {
                (Some(w), Some(n), Some(e), Some(p)) if errors.is_empty() => (w, n, e, p),
                _ => return Err(errors.into()),
            };

        if self
            .repository
            .registration_exists(workshop.id, &user_email)
            .await?
        {
            tracing::info!(
                "Duplicate registration rejected: workshop_id={}",
                workshop.id
            );
            return Err(AppError::BadRequest(DUPLICATE_REGISTRATION_MESSAGE.to_string()));
        }

        let new_registration = NewRegistration {
            workshop_id: workshop.id,
            user_name,
            user_email,
            phone_number,
            will_attend_physical: dto.will_attend_physical,
            django_experience: dto.django_experience,
        };

        let registration = self.repository.insert(&new_registration).await?;

        tracing::info!(
            "Workshop registration created: id={}, workshop_id={}",
            registration.id,
            workshop.id
        );

        let notifier = Arc::clone(&self.notifier);
        let (notify_workshop, notify_registration) = (workshop.clone(), registration.clone());
        let notification = tokio::spawn(async move {
            notifier
                .registration_confirmed(&notify_workshop, &notify_registration)
                .await
        });

        Ok(Registered {
            registration: RegistrationResponseDto::new(registration, &workshop),
            notification,
        })
    }

    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<RegistrationResponseDto>, i64)> {
        let (items, total) = self
            .repository
            .list(None, pagination.offset(), pagination.limit())
            .await?;
        Ok((items.into_iter().map(Into::into).collect(), total))
    }

    /// Registrations of one workshop; 404 when the workshop does not exist
    pub async fn list_for_workshop(
        &self,
        workshop_id: i64,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<RegistrationResponseDto>, i64)> {
        if self.repository.find_workshop(workshop_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Workshop with id {} not found",
                workshop_id
            )));
        }

        let (items, total) = self
            .repository
            .list(Some(workshop_id), pagination.offset(), pagination.limit())
            .await?;
        Ok((items.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<RegistrationResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Registration with id {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Registration with id {} not found",
                id
            )));
        }
        tracing::info!("Workshop registration deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::NotificationService;
    use crate::features::workshops::models::ExperienceLevel;
    use crate::modules::mail::Mailer;
    use crate::shared::templates::TemplateRenderer;
    use crate::shared::test_helpers::{
        workshop_fixture, FailingMailer, InMemoryRegistrationRepository, RecordingMailer,
    };
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn dto(workshop: i64, name: &str, email: &str) -> CreateRegistrationDto {
        CreateRegistrationDto {
            workshop,
            user_name: name.to_string(),
            user_email: email.to_string(),
            phone_number: None,
            will_attend_physical: true,
            django_experience: ExperienceLevel::Beginner,
        }
    }

    fn setup(mailer: Arc<dyn Mailer>) -> (Arc<InMemoryRegistrationRepository>, RegistrationService) {
        let repository = Arc::new(InMemoryRegistrationRepository::with_workshops(vec![
            workshop_fixture(1, "Intro to Django"),
        ]));
        let notifier = Arc::new(NotificationService::new(
            mailer,
            Arc::new(TemplateRenderer::empty()),
            "Django Campus",
        ));
        let service = RegistrationService::new(repository.clone(), notifier);
        (repository, service)
    }

    #[tokio::test]
    async fn test_register_normalizes_and_notifies() {
        let mailer = Arc::new(RecordingMailer::new());
        let (repository, service) = setup(mailer.clone());

        let registered = service
            .register(dto(1, "  jane doe ", "  User@Example.COM "))
            .await
            .unwrap();

        assert_eq!(registered.registration.user_name, "Jane Doe");
        assert_eq!(registered.registration.user_email, "user@example.com");
        assert_eq!(registered.registration.workshop_name, "Intro to Django");
        assert_eq!(repository.registration_count(), 1);

        assert!(registered.notification.await.unwrap());
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "user@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected_without_notification() {
        let mailer = Arc::new(RecordingMailer::new());
        let (repository, service) = setup(mailer.clone());
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();

        let first = service.register(dto(1, &name, &email)).await.unwrap();
        first.notification.await.unwrap();

        // Same address with different casing and padding
        let second = service
            .register(dto(1, &name, &format!("  {}  ", email.to_uppercase())))
            .await;

        match second {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, DUPLICATE_REGISTRATION_MESSAGE),
            Err(other) => panic!("expected duplicate rejection, got {other:?}"),
            Ok(_) => panic!("expected duplicate rejection, got a second registration"),
        }
        assert_eq!(repository.registration_count(), 1);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_field_errors_are_collected() {
        let (repository, service) = setup(Arc::new(RecordingMailer::new()));

        let mut bad = dto(99, " j ", "not-an-email");
        bad.phone_number = Some("12345678901234".to_string());

        let Err(AppError::InvalidFields(errors)) = service.register(bad).await else {
            panic!("expected field errors");
        };

        assert_eq!(
            errors.get("user_name"),
            Some(&["Name must be at least 2 characters long.".to_string()][..])
        );
        assert_eq!(
            errors.get("user_email"),
            Some(&["Enter a valid email address.".to_string()][..])
        );
        assert!(errors.get("phone_number").is_some());
        assert_eq!(
            errors.get("workshop"),
            Some(&["Workshop 99 does not exist.".to_string()][..])
        );
        assert_eq!(repository.registration_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_registration() {
        let (repository, service) = setup(Arc::new(FailingMailer));

        let registered = service
            .register(dto(1, "Grace Hopper", "grace@example.com"))
            .await
            .unwrap();

        assert!(!registered.notification.await.unwrap());
        assert_eq!(repository.registration_count(), 1);
        assert!(service.get(registered.registration.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_time_unique_violation_is_rejected() {
        let (repository, service) = setup(Arc::new(RecordingMailer::new()));
        // Pre-check misses existing rows, as in a check-then-insert race
        repository.skip_exists_check();
        service
            .register(dto(1, "Ada Lovelace", "ada@example.com"))
            .await
            .unwrap();

        let result = service
            .register(dto(1, "Ada Lovelace", "ada@example.com"))
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, DUPLICATE_REGISTRATION_MESSAGE),
            _ => panic!("expected duplicate rejection"),
        }
        assert_eq!(repository.registration_count(), 1);
    }

    #[tokio::test]
    async fn test_list_get_and_delete() {
        let (_, service) = setup(Arc::new(RecordingMailer::new()));
        let a = service
            .register(dto(1, "Ada Lovelace", "ada@example.com"))
            .await
            .unwrap();
        service
            .register(dto(1, "Grace Hopper", "grace@example.com"))
            .await
            .unwrap();

        let (items, total) = service.list(&PaginationQuery::default()).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].user_email, "ada@example.com");

        let (items, total) = service
            .list_for_workshop(1, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!((items.len(), total), (2, 2));
        assert!(matches!(
            service
                .list_for_workshop(42, &PaginationQuery::default())
                .await,
            Err(AppError::NotFound(_))
        ));

        service.delete(a.registration.id).await.unwrap();
        assert!(matches!(
            service.get(a.registration.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(a.registration.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
