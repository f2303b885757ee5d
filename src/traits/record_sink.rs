use crate::errors::BenchResult;
use crate::models::record::EvaluationRecord;

/// Destination for evaluation records, fed one record at a time as the
/// batch driver produces them
pub trait RecordSink: Send {
    fn write(&mut self, record: &EvaluationRecord) -> BenchResult<()>;
}

/// In-memory collection, used when the caller inspects records directly
impl RecordSink for Vec<EvaluationRecord> {
    fn write(&mut self, record: &EvaluationRecord) -> BenchResult<()> {
        self.push(record.clone());
        Ok(())
    }
}
