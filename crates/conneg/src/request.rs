//! A borrowed view over the parts of a request the negotiation layer reads.

use http::{HeaderMap, Method, Request, Uri};

/// The context of one HTTP request: method, target and headers. The
/// negotiation core only consults the headers; method and URI ride along for
/// downstream handlers.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'req> {
    method: &'req Method,
    uri: &'req Uri,
    headers: &'req HeaderMap,
}

impl<'req> RequestContext<'req> {
    pub fn new(method: &'req Method, uri: &'req Uri, headers: &'req HeaderMap) -> Self {
        Self { method, uri, headers }
    }

    pub fn method(&self) -> &Method {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        self.headers
    }
}

impl<'req, B> From<&'req Request<B>> for RequestContext<'req> {
    fn from(req: &'req Request<B>) -> Self {
        Self::new(req.method(), req.uri(), req.headers())
    }
}
