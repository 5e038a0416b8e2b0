use super::revalidation::*;

use {
    http::{request::*, response::*},
    http_body::*,
    kutil::std::future::*,
    std::{mem, result::Result, task::*},
    tower::*,
};

//
// RevalidationService
//

/// HTTP revalidation override service.
///
/// You will often be using [RevalidationLayer](super::RevalidationLayer) rather than this service
/// directly, thus this service's functionality is documented there.
pub struct RevalidationService<InnerServiceT> {
    inner_service: InnerServiceT,
    revalidation: RevalidationConfiguration,
}

impl<InnerServiceT> RevalidationService<InnerServiceT> {
    /// Constructor.
    pub fn new(inner_service: InnerServiceT, revalidation: RevalidationConfiguration) -> Self {
        Self {
            inner_service,
            revalidation,
        }
    }

    /// Inner service.
    pub fn inner_service(&self) -> &InnerServiceT {
        &self.inner_service
    }

    // Clone while keeping `inner_service`.
    //
    // See: https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
    fn clone_and_keep_inner_service(&mut self) -> Self
    where
        InnerServiceT: Clone,
    {
        let mut clone = self.clone();
        clone.inner_service = mem::replace(&mut self.inner_service, clone.inner_service);
        clone
    }

    // Handle request.
    async fn handle<RequestBodyT, ResponseBodyT>(
        mut self,
        request: Request<RequestBodyT>,
    ) -> Result<Response<ResponseBodyT>, InnerServiceT::Error>
    where
        InnerServiceT: Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>>,
        ResponseBodyT: Default,
    {
        if request.still_fresh(&self.revalidation) {
            return Ok(not_modified_response(request));
        }

        // Errors are the inner service's business and are passed through as is
        self.inner_service.call(request).await
    }
}

impl<InnerServiceT> Clone for RevalidationService<InnerServiceT>
where
    InnerServiceT: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner_service: self.inner_service.clone(),
            revalidation: self.revalidation.clone(),
        }
    }
}

impl<InnerServiceT, RequestBodyT, ResponseBodyT, ErrorT> Service<Request<RequestBodyT>>
    for RevalidationService<InnerServiceT>
where
    InnerServiceT: 'static
        + Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>, Error = ErrorT>
        + Clone
        + Send,
    InnerServiceT::Future: Send,
    RequestBodyT: 'static + Send,
    ResponseBodyT: 'static + Body + Default + Send,
    ErrorT: 'static + Send,
{
    type Response = Response<ResponseBodyT>;
    type Error = ErrorT;
    type Future = CapturedFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context) -> Poll<Result<(), Self::Error>> {
        // We might not need the inner service for this request, but we can't know that before
        // seeing the request
        self.inner_service.poll_ready(context)
    }

    fn call(&mut self, request: Request<RequestBodyT>) -> Self::Future {
        let cloned_self = self.clone_and_keep_inner_service();
        capture_async! { cloned_self.handle(request).await }
    }
}
