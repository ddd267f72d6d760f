//! Request dispatch: routing table, action results, model binding, and the
//! pipeline that turns a request into a written response.

mod dispatcher;
mod model;
mod result;
mod router;

pub use dispatcher::Dispatcher;
pub use model::bind_request_model;
pub use result::{ActionResult, StatusCodeResult, ViewResult};
pub use router::{Handler, Route, Router};
