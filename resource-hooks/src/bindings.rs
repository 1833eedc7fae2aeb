//! Fetchers and mutators for one kind of record, wired to its service.

use payloads::{
    APIClient, ApiResponse, Entity, EntityId, ListParams, MessageResponse,
    RequestOptions, Resource, ResourceService,
};
use std::rc::Rc;

use crate::{
    fetch::{FetchOptions, Fetcher},
    mutation::{MutationOptions, Mutator},
    notify::Notifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Action {
    #[display("created")]
    Created,
    #[display("updated")]
    Updated,
    #[display("deleted")]
    Deleted,
}

/// E.g. "FAQ deleted successfully".
pub fn success_message(resource: Resource, action: Action) -> String {
    format!("{} {action} successfully", resource.label())
}

/// Keeps a caller's own success message, otherwise uses the default one.
pub fn with_default_message<T>(
    mut options: MutationOptions<T>,
    resource: Resource,
    action: Action,
) -> MutationOptions<T> {
    if options.success_message.is_none() {
        options.success_message = Some(success_message(resource, action));
    }
    options
}

pub type ListFetcher<E> = Fetcher<ApiResponse<Vec<E>>, ListParams>;
pub type OneFetcher<E> = Fetcher<ApiResponse<E>, EntityId>;

/// Arguments of an update: the record and its new field values.
pub type UpdateArgs<E> = (EntityId, <E as Entity>::Form);

pub struct ResourceHooks<E> {
    service: ResourceService<E>,
    notifier: Rc<dyn Notifier>,
}

impl<E> ResourceHooks<E>
where
    E: Entity,
    E::Form: 'static,
{
    pub fn new(client: &APIClient, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            service: client.service::<E>(),
            notifier,
        }
    }

    /// `GET /{resource}` with `params` as the tracked dependency.
    pub fn list(
        &self,
        params: ListParams,
        options: FetchOptions<ApiResponse<Vec<E>>>,
    ) -> ListFetcher<E> {
        let service = self.service.clone();
        Fetcher::new(
            params,
            move |params: ListParams| {
                let service = service.clone();
                async move { service.get_all(&params).await }
            },
            self.notifier.clone(),
            options,
        )
    }

    /// `GET /{resource}/{id}` with the id as the tracked dependency.
    pub fn one(
        &self,
        id: EntityId,
        options: FetchOptions<ApiResponse<E>>,
    ) -> OneFetcher<E> {
        let service = self.service.clone();
        Fetcher::new(
            id,
            move |id: EntityId| {
                let service = service.clone();
                async move { service.get_by_id(id).await }
            },
            self.notifier.clone(),
            options,
        )
    }

    pub fn create(
        &self,
        options: MutationOptions<ApiResponse<E>>,
    ) -> Mutator<E::Form, ApiResponse<E>> {
        let service = self.service.clone();
        Mutator::new(
            move |form: E::Form| {
                let service = service.clone();
                async move { service.create(&form, &RequestOptions::default()).await }
            },
            self.notifier.clone(),
            with_default_message(options, E::RESOURCE, Action::Created),
        )
    }

    pub fn update(
        &self,
        options: MutationOptions<ApiResponse<E>>,
    ) -> Mutator<UpdateArgs<E>, ApiResponse<E>> {
        let service = self.service.clone();
        Mutator::new(
            move |(id, form): UpdateArgs<E>| {
                let service = service.clone();
                async move {
                    service.update(id, &form, &RequestOptions::default()).await
                }
            },
            self.notifier.clone(),
            with_default_message(options, E::RESOURCE, Action::Updated),
        )
    }

    pub fn delete(
        &self,
        options: MutationOptions<MessageResponse>,
    ) -> Mutator<EntityId, MessageResponse> {
        let service = self.service.clone();
        Mutator::new(
            move |id: EntityId| {
                let service = service.clone();
                async move { service.delete(id).await }
            },
            self.notifier.clone(),
            with_default_message(options, E::RESOURCE, Action::Deleted),
        )
    }
}
