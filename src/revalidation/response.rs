use http::{header::*, request, *};

//
// OriginalRequest
//

/// Response extension associating a synthesized response with the request it answers.
#[derive(Clone, Debug)]
pub struct OriginalRequest {
    /// Method.
    pub method: Method,

    /// URI.
    pub uri: Uri,

    /// Version.
    pub version: Version,

    /// Headers.
    pub headers: HeaderMap,
}

impl From<&request::Parts> for OriginalRequest {
    fn from(parts: &request::Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            version: parts.version,
            headers: parts.headers.clone(),
        }
    }
}

/// Synthesized [StatusCode::NOT_MODIFIED] response.
///
/// The body is empty ([Default]). The request's version and `Transfer-Encoding` are mirrored and
/// the request itself is available via the [OriginalRequest] extension.
pub fn not_modified_response<RequestBodyT, ResponseBodyT>(
    request: Request<RequestBodyT>,
) -> Response<ResponseBodyT>
where
    ResponseBodyT: Default,
{
    let (parts, _body) = request.into_parts();

    let mut response = Response::new(ResponseBodyT::default());
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    *response.version_mut() = parts.version;

    let headers = response.headers_mut();
    for value in parts.headers.get_all(TRANSFER_ENCODING) {
        headers.append(TRANSFER_ENCODING, value.clone());
    }

    response.extensions_mut().insert(OriginalRequest::from(&parts));
    response
}
