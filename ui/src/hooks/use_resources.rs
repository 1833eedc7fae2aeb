//! Hooks for the CRUD endpoints of every content type.

use payloads::{
    ApiResponse, Attribute, Benefit, Booking, Entity, EntityId, Faq, Future,
    ListParams, MessageResponse, Project, RequestOptions, Service, Step, User,
};
use resource_hooks::{
    Action, FetchOptions, MutationOptions, bindings::with_default_message,
};
use yew::prelude::*;

use super::{FetchHookReturn, MutationHookReturn, use_fetch, use_mutation};
use crate::contexts::use_api_client;

pub type ListHook<E> = FetchHookReturn<ApiResponse<Vec<E>>, ListParams>;
pub type OneHook<E> = FetchHookReturn<ApiResponse<E>, EntityId>;
pub type SaveHook<A, E> = MutationHookReturn<A, ApiResponse<E>>;
pub type DeleteHook = MutationHookReturn<EntityId, MessageResponse>;

#[hook]
pub fn use_list<E: Entity>(
    params: ListParams,
    options: FetchOptions<ApiResponse<Vec<E>>>,
) -> ListHook<E> {
    let service = use_api_client().service::<E>();
    use_fetch(
        params,
        move |params: ListParams| {
            let service = service.clone();
            async move { service.get_all(&params).await }
        },
        options,
    )
}

#[hook]
pub fn use_one<E: Entity>(
    id: EntityId,
    options: FetchOptions<ApiResponse<E>>,
) -> OneHook<E> {
    let service = use_api_client().service::<E>();
    use_fetch(
        id,
        move |id: EntityId| {
            let service = service.clone();
            async move { service.get_by_id(id).await }
        },
        options,
    )
}

#[hook]
pub fn use_create<E>(
    options: MutationOptions<ApiResponse<E>>,
) -> SaveHook<E::Form, E>
where
    E: Entity,
    E::Form: 'static,
{
    let service = use_api_client().service::<E>();
    use_mutation(
        move |form: E::Form| {
            let service = service.clone();
            async move { service.create(&form, &RequestOptions::default()).await }
        },
        with_default_message(options, E::RESOURCE, Action::Created),
    )
}

#[hook]
pub fn use_update<E>(
    options: MutationOptions<ApiResponse<E>>,
) -> SaveHook<(EntityId, E::Form), E>
where
    E: Entity,
    E::Form: 'static,
{
    let service = use_api_client().service::<E>();
    use_mutation(
        move |(id, form): (EntityId, E::Form)| {
            let service = service.clone();
            async move {
                service.update(id, &form, &RequestOptions::default()).await
            }
        },
        with_default_message(options, E::RESOURCE, Action::Updated),
    )
}

#[hook]
pub fn use_delete<E: Entity>(
    options: MutationOptions<MessageResponse>,
) -> DeleteHook {
    let service = use_api_client().service::<E>();
    use_mutation(
        move |id: EntityId| {
            let service = service.clone();
            async move { service.delete(id).await }
        },
        with_default_message(options, E::RESOURCE, Action::Deleted),
    )
}

/// Named hooks per content type, e.g. `use_steps`, `use_step`,
/// `use_create_step`, `use_update_step` and `use_delete_step`.
macro_rules! named_hooks {
    ($($entity:ty => $list:ident, $one:ident, $create:ident, $update:ident, $delete:ident;)*) => {
        $(
            #[hook]
            pub fn $list(
                params: ListParams,
                options: FetchOptions<ApiResponse<Vec<$entity>>>,
            ) -> ListHook<$entity> {
                use_list::<$entity>(params, options)
            }

            #[hook]
            pub fn $one(
                id: EntityId,
                options: FetchOptions<ApiResponse<$entity>>,
            ) -> OneHook<$entity> {
                use_one::<$entity>(id, options)
            }

            #[hook]
            pub fn $create(
                options: MutationOptions<ApiResponse<$entity>>,
            ) -> SaveHook<<$entity as Entity>::Form, $entity> {
                use_create::<$entity>(options)
            }

            #[hook]
            pub fn $update(
                options: MutationOptions<ApiResponse<$entity>>,
            ) -> SaveHook<(EntityId, <$entity as Entity>::Form), $entity> {
                use_update::<$entity>(options)
            }

            #[hook]
            pub fn $delete(options: MutationOptions<MessageResponse>) -> DeleteHook {
                use_delete::<$entity>(options)
            }
        )*
    };
}

named_hooks! {
    Attribute => use_attributes, use_attribute, use_create_attribute, use_update_attribute, use_delete_attribute;
    Benefit => use_benefits, use_benefit, use_create_benefit, use_update_benefit, use_delete_benefit;
    Booking => use_books, use_book, use_create_book, use_update_book, use_delete_book;
    Faq => use_faqs, use_faq, use_create_faq, use_update_faq, use_delete_faq;
    Future => use_futures, use_future, use_create_future, use_update_future, use_delete_future;
    Project => use_projects, use_project, use_create_project, use_update_project, use_delete_project;
    Service => use_services, use_service, use_create_service, use_update_service, use_delete_service;
    Step => use_steps, use_step, use_create_step, use_update_step, use_delete_step;
    User => use_users, use_user, use_create_user, use_update_user, use_delete_user;
}
