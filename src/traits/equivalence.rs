use async_trait::async_trait;

use crate::errors::BenchResult;
use crate::models::common::Domain;
use crate::models::formula::Formula;
use crate::models::smv::SmvModel;
use crate::models::verification::{ EquivalenceVerdict, RawOutput };

/// Capability that runs a decision procedure on a synthesized model.
///
/// The only production implementation shells out to nuXmv, but an
/// in-process model checker could stand behind the same method.
#[async_trait]
pub trait EquivalenceDecider: Send + Sync {
    /// Name used in logs and error messages
    fn tool_name(&self) -> &str;

    /// Run the procedure on `model` and capture what it printed.
    ///
    /// A timeout is reported through [`RawOutput::timed_out`], not as an
    /// error. Errors are reserved for configuration and I/O failures.
    async fn decide(&self, model: &SmvModel) -> BenchResult<RawOutput>;

    /// Check whether the procedure can be run at all
    async fn check_available(&self) -> BenchResult<bool>;
}

/// Three-valued equivalence decision between a reference and a candidate
#[async_trait]
pub trait EquivalenceOracle: Send + Sync {
    /// Compare two formulas under `domain`'s variable schema
    async fn decide(
        &self,
        domain: &Domain,
        reference: &Formula,
        generated: &Formula
    ) -> BenchResult<EquivalenceVerdict>;

    /// Short label for reports
    fn describe(&self) -> String;
}
