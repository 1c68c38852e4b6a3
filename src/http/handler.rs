use std::path::{Path, PathBuf};

use crate::config::ContentConfig;
use crate::content::resolver;
use crate::http::request::{Method, Request};
use crate::http::response::{ComposeError, Response, StatusCode};

/// Per-request states. `Composed` is terminal; there is no retry or
/// re-entry.
enum HandlerState {
    Created,
    PathValidated(PathBuf),
    MethodDispatched,
    Composed,
}

/// Runs one request through validation, method dispatch and composition,
/// returning the finished [`Response`].
///
/// Every path through the state machine ends in exactly one composition;
/// the only error is a composition defect, which the caller treats as
/// fatal for the request rather than answering the client with a partial
/// buffer.
pub fn handle(request: &Request, content: &ContentConfig) -> Result<Response, ComposeError> {
    Handler::new(request, content).run()
}

struct Handler<'a> {
    request: &'a Request,
    content: &'a ContentConfig,
    response: Response,
    state: HandlerState,
}

impl<'a> Handler<'a> {
    fn new(request: &'a Request, content: &'a ContentConfig) -> Self {
        Self {
            request,
            content,
            response: Response::new(),
            state: HandlerState::Created,
        }
    }

    fn run(mut self) -> Result<Response, ComposeError> {
        loop {
            match &mut self.state {
                HandlerState::Created => {
                    // Unrecognized methods are refused before the path is
                    // ever looked at.
                    if self.request.method == Method::BAD {
                        self.response
                            .set_params(StatusCode::NotImplemented, "Request method not supported.");
                        self.response.compose()?;
                        self.state = HandlerState::Composed;
                        continue;
                    }

                    match resolver::resolve(
                        &self.request.path,
                        &self.content.root,
                        &self.content.default_document,
                    ) {
                        Ok(path) => {
                            self.state = HandlerState::PathValidated(path);
                        }
                        Err(rejection) => {
                            tracing::debug!(
                                status = rejection.status().as_u16(),
                                details = %rejection.details(),
                                path = %self.request.path,
                                "Request path rejected"
                            );
                            self.response
                                .set_params(rejection.status(), rejection.details());
                            self.response.compose()?;
                            self.state = HandlerState::Composed;
                        }
                    }
                }

                HandlerState::PathValidated(path) => {
                    let path = std::mem::take(path);
                    self.dispatch(&path);
                    self.state = HandlerState::MethodDispatched;
                }

                HandlerState::MethodDispatched => {
                    self.response.compose()?;
                    self.state = HandlerState::Composed;
                }

                HandlerState::Composed => {
                    break;
                }
            }
        }

        Ok(self.response)
    }

    fn dispatch(&mut self, path: &Path) {
        match self.request.method {
            Method::GET => self.serve_file(path),

            // Succeeds without producing a body.
            Method::HEAD => {
                self.response.set_params(StatusCode::Ok, "OK");
            }

            // Accepted but the request body is deliberately not processed.
            Method::POST => {
                self.response.set_params(StatusCode::Ok, "OK");
            }

            // Filtered out in the Created state.
            Method::BAD => {
                self.response
                    .set_params(StatusCode::NotImplemented, "Request method not supported.");
            }
        }
    }

    fn serve_file(&mut self, path: &Path) {
        match std::fs::read(path) {
            Ok(contents) => {
                self.response
                    .set_header("Content-Length", contents.len().to_string());
                self.response.set_body(contents);
                self.response.set_params(StatusCode::Ok, "OK");
            }
            Err(e) => {
                // Existence was checked during resolution; a failure here is
                // the open racing a concurrent removal, or a non-file target.
                tracing::warn!(path = %path.display(), error = %e, "Failed to open served file");
                self.response
                    .set_params(StatusCode::InternalServerError, "Error opening file");
            }
        }
    }
}
