//! Runs statements against a driver, one session per request.

use crate::{
    CoreResult, RequestPlan, SchemaContext,
    connector::{Driver, Record},
    statement::Statement,
};
use serde_json::Value;

/// Opens a session, runs the statement and closes the session again, whatever
/// the outcome. A failed run is reported over a failed close.
#[tracing::instrument(skip_all)]
pub async fn run_statement(driver: &dyn Driver, statement: &Statement) -> CoreResult<Vec<Record>> {
    let mut session = driver.session().await?;

    let result = session.run(&statement.text, &statement.parameters).await;
    let closed = session.close().await;

    match (result, closed) {
        (Ok(records), Ok(())) => Ok(records),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                tracing::warn!(error = %close_err, "failed to close session after a failed run");
            }

            Err(err.into())
        }
        (Ok(_), Err(err)) => Err(err.into()),
    }
}

/// Runs a plan and shapes its records into response data.
pub async fn execute_plan(driver: &dyn Driver, ctx: &SchemaContext, plan: RequestPlan) -> CoreResult<Value> {
    let records = run_statement(driver, plan.statement()).await?;
    plan.shape(ctx, records)
}
