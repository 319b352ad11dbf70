//! Command dispatch: one request/response endpoint per command topic
//!
//! Each endpoint is served by its own task. A handler extracts the request
//! fields, awaits the matching application operation, and always replies
//! with a well-formed response: an application failure becomes
//! `status=Error` with the failure text, it never reaches the transport
//! layer. Because every handler runs on its own endpoint task, a slow
//! operation (status, history) stalls only its own topic.

use crate::app::{Application, StartOptions};
use crate::messages::command::{
    BalanceLimitRequest, BalanceLimitResponse, BalancePaperRequest, BalancePaperResponse,
    ConfigRequest, ConfigResponse, HistoryRequest, HistoryResponse, ImportRequest, ImportResponse,
    StartRequest, StartResponse, StatusCode, StatusRequest, StatusResponse, StopRequest,
    StopResponse,
};
use crate::transport::Endpoint;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The serving side of every command topic, as created by the bus client
pub struct CommandEndpoints {
    pub start: Box<dyn Endpoint<StartRequest, StartResponse>>,
    pub stop: Box<dyn Endpoint<StopRequest, StopResponse>>,
    pub config: Box<dyn Endpoint<ConfigRequest, ConfigResponse>>,
    pub import: Box<dyn Endpoint<ImportRequest, ImportResponse>>,
    pub status: Box<dyn Endpoint<StatusRequest, StatusResponse>>,
    pub history: Box<dyn Endpoint<HistoryRequest, HistoryResponse>>,
    pub balance_limit: Box<dyn Endpoint<BalanceLimitRequest, BalanceLimitResponse>>,
    pub balance_paper: Box<dyn Endpoint<BalancePaperRequest, BalancePaperResponse>>,
}

/// Command dispatcher: owns the endpoint serving tasks
pub struct Commands {
    tasks: Vec<JoinHandle<()>>,
}

impl Commands {
    /// Spawn one serving task per command endpoint.
    ///
    /// Must be called from within the gateway runtime.
    pub fn attach(app: Arc<dyn Application>, endpoints: CommandEndpoints) -> Self {
        let mut tasks = Vec::with_capacity(8);

        let app_ = app.clone();
        tasks.push(serve(endpoints.start, move |req| {
            let app = app_.clone();
            async move { on_start(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.stop, move |req| {
            let app = app_.clone();
            async move { on_stop(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.config, move |req| {
            let app = app_.clone();
            async move { on_config(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.import, move |req| {
            let app = app_.clone();
            async move { on_import(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.status, move |req| {
            let app = app_.clone();
            async move { on_status(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.history, move |req| {
            let app = app_.clone();
            async move { on_history(app.as_ref(), req).await }
        }));

        let app_ = app.clone();
        tasks.push(serve(endpoints.balance_limit, move |req| {
            let app = app_.clone();
            async move { on_balance_limit(app.as_ref(), req).await }
        }));

        let app_ = app;
        tasks.push(serve(endpoints.balance_paper, move |req| {
            let app = app_.clone();
            async move { on_balance_paper(app.as_ref(), req).await }
        }));

        Self { tasks }
    }

    /// Stop serving. Requests already being handled are abandoned; their
    /// reply slots drop and the requester sees the channel close.
    pub fn detach(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Commands {
    fn drop(&mut self) {
        self.detach();
    }
}

fn serve<Req, Res, H, Fut>(mut endpoint: Box<dyn Endpoint<Req, Res>>, handler: H) -> JoinHandle<()>
where
    Req: DeserializeOwned + Send + 'static,
    Res: Serialize + Send + 'static,
    H: Fn(Req) -> Fut + Send + 'static,
    Fut: Future<Output = Res> + Send + 'static,
{
    tokio::spawn(async move {
        while let Some((request, reply)) = endpoint.next().await {
            let response = handler(request).await;
            if reply.send(response).is_err() {
                warn!("requester dropped before the response was sent");
            }
        }
    })
}

pub(crate) async fn on_start(app: &dyn Application, req: StartRequest) -> StartResponse {
    let opts = StartOptions {
        log_level: req.log_level,
        restore: req.restore,
        script: req.script,
        is_quickstart: req.is_quickstart,
    };
    match app.start(opts).await {
        Ok(()) => StartResponse::default(),
        Err(e) => StartResponse::err(e.to_string()),
    }
}

pub(crate) async fn on_stop(app: &dyn Application, req: StopRequest) -> StopResponse {
    match app.stop(req.skip_order_cancellation).await {
        Ok(()) => StopResponse::default(),
        Err(e) => StopResponse::err(e.to_string()),
    }
}

/// Empty `params` runs the interactive flow. Otherwise pairs are taken in
/// request order: keys outside the allow-list are skipped without a trace,
/// an accepted pair is recorded in `changes` before it is applied, and the
/// first application failure aborts the iteration with the pairs recorded
/// so far retained.
pub(crate) async fn on_config(app: &dyn Application, req: ConfigRequest) -> ConfigResponse {
    let mut response = ConfigResponse::default();

    if req.params.is_empty() {
        if let Err(e) = app.interactive_config().await {
            response.status = StatusCode::Error;
            response.msg = e.to_string();
        }
        return response;
    }

    let allowed = app.configurable_keys();
    for (key, value) in req.params {
        if !allowed.contains(&key) {
            continue;
        }
        response.changes.push((key.clone(), value.clone()));
        if let Err(e) = app.apply_config(&key, &value).await {
            response.status = StatusCode::Error;
            response.msg = e.to_string();
            break;
        }
    }
    response
}

/// A missing strategy name is answered with the default response without
/// touching the application. A failed import is reported twice on purpose:
/// in the response and through the application's own notification path,
/// so an operator watching either surface sees it.
pub(crate) async fn on_import(app: &dyn Application, req: ImportRequest) -> ImportResponse {
    let Some(strategy) = req.strategy else {
        return ImportResponse::default();
    };

    let config_file = format!("{}.yml", strategy);
    match app.import_strategy(&config_file).await {
        Ok(()) => ImportResponse::default(),
        Err(e) => {
            app.notify(&e.to_string()).await;
            ImportResponse::err(e.to_string())
        }
    }
}

pub(crate) async fn on_status(app: &dyn Application, _req: StatusRequest) -> StatusResponse {
    match app.strategy_status().await {
        Ok(text) => StatusResponse {
            data: text.trim().to_string(),
            ..StatusResponse::default()
        },
        Err(e) => StatusResponse::err(e.to_string()),
    }
}

pub(crate) async fn on_history(app: &dyn Application, req: HistoryRequest) -> HistoryResponse {
    if let Err(e) = app
        .display_history(req.days, req.verbose, req.precision)
        .await
    {
        return HistoryResponse::err(e.to_string());
    }
    match app.history_trades(req.days).await {
        Ok(trades) => HistoryResponse {
            trades,
            ..HistoryResponse::default()
        },
        Err(e) => HistoryResponse::err(e.to_string()),
    }
}

pub(crate) async fn on_balance_limit(
    app: &dyn Application,
    req: BalanceLimitRequest,
) -> BalanceLimitResponse {
    match app
        .balance_limit(&req.exchange, &req.asset, req.amount)
        .await
    {
        Ok(data) => BalanceLimitResponse {
            data,
            ..BalanceLimitResponse::default()
        },
        Err(e) => BalanceLimitResponse::err(e.to_string()),
    }
}

pub(crate) async fn on_balance_paper(
    app: &dyn Application,
    req: BalancePaperRequest,
) -> BalancePaperResponse {
    match app.balance_paper(&req.asset, req.amount).await {
        Ok(data) => BalancePaperResponse {
            data,
            ..BalancePaperResponse::default()
        },
        Err(e) => BalancePaperResponse::err(e.to_string()),
    }
}
