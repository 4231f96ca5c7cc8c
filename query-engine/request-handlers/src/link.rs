use crate::{BindingConfig, GQLResponse, HandlerError, Operation, OperationKind, Result};
use query_core::{Driver, IdGenerator, IndexConfig, RequestPlan, SchemaContext, SchemaContextRef, execute_plan};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Turns operations into statements, runs them on a fresh session each and
/// hands back the shaped `data`.
#[derive(Clone)]
pub struct Link {
    ctx: SchemaContextRef,
    driver: Arc<dyn Driver>,
    log: bool,
    index_config: IndexConfig,
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("log", &self.log)
            .field("index_config", &self.index_config)
            .finish_non_exhaustive()
    }
}

impl Link {
    pub fn new(ctx: SchemaContextRef, driver: Arc<dyn Driver>, config: &BindingConfig) -> Self {
        Self {
            ctx,
            driver,
            log: config.log,
            index_config: config.index_config.clone(),
        }
    }

    pub fn context(&self) -> &SchemaContextRef {
        &self.ctx
    }

    /// Plans the operation without running it.
    pub fn plan(&self, operation: &Operation) -> Result<RequestPlan> {
        plan_operation(&self.ctx, operation, self.index_config.generator())
    }

    #[tracing::instrument(skip_all, fields(kind = %operation.kind(), field = operation.root_field()))]
    pub async fn request(&self, operation: &Operation) -> Result<Value> {
        let plan = self.plan(operation)?;

        if self.log {
            let statement = plan.statement();
            let parameters = Value::Object(statement.parameters.clone());

            tracing::info!(is_query = true, statement = %statement.text, parameters = %parameters, "request");
        }

        let data = execute_plan(self.driver.as_ref(), &self.ctx, plan).await?;

        if self.log {
            tracing::info!(response = %data, "response");
        }

        Ok(data)
    }

    pub async fn handle(&self, operation: &Operation) -> GQLResponse {
        self.request(operation).await.into()
    }
}

/// Queries go to the database as they are, generated mutations are compiled,
/// everything else is forwarded. Subscriptions are refused.
pub fn plan_operation(ctx: &SchemaContext, operation: &Operation, ids: Option<&dyn IdGenerator>) -> Result<RequestPlan> {
    let plan = match operation.kind() {
        OperationKind::Query => RequestPlan::query(operation.text(), operation.variables()),
        OperationKind::Mutation => RequestPlan::mutation(
            ctx,
            operation.text(),
            operation.root_field(),
            operation.variables(),
            ids,
        )?,
        OperationKind::Subscription => {
            return Err(HandlerError::unsupported_feature(
                "Subscriptions",
                format!("request type `{}` cannot be resolved by the database", operation.kind()),
            ));
        }
    };

    Ok(plan)
}
