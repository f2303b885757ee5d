use std::fs::File;
use std::io::{ BufReader, Read };
use std::path::Path;

use log::{ debug, info, warn };
use serde::Deserialize;

use crate::errors::{ BenchError, BenchResult };
use crate::models::formula::Formula;
use crate::models::record::{ LtlExample, RequirementRow };

const REQUIRED_COLUMNS: [&str; 4] = ["ID", "NL description", "FRETish", "LTL"];

/// UTF-8 byte-order mark that spreadsheet exports put before the header
const BOM: &str = "\u{feff}";

fn open(path: &Path) -> BenchResult<String> {
    let file = File::open(path).map_err(|e| {
        BenchError::DatasetError(format!("cannot open {}: {}", path.display(), e))
    })?;
    let mut contents = String::new();
    BufReader::new(file)
        .read_to_string(&mut contents)
        .map_err(|e| BenchError::DatasetError(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(contents.strip_prefix(BOM).map(str::to_string).unwrap_or(contents))
}

/// Parse semicolon-delimited requirements text.
///
/// Header names and cells are trimmed. All four columns must be present.
pub fn parse_requirements(contents: &str) -> BenchResult<Vec<RequirementRow>> {
    let mut reader = csv::ReaderBuilder
        ::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| BenchError::DatasetError(format!("unreadable header: {}", e)))?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS.iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(BenchError::DatasetError(format!("missing required columns: {}", missing.join(", "))));
    }

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<RequirementRow>().enumerate() {
        let row = record.map_err(|e| BenchError::DatasetError(format!("row {}: {}", line + 2, e)))?;
        rows.push(row);
    }
    debug!("Parsed {} requirement rows", rows.len());
    Ok(rows)
}

/// Load every requirement row from a semicolon-delimited file
pub fn load_requirements(path: &Path) -> BenchResult<Vec<RequirementRow>> {
    let rows = parse_requirements(&open(path)?)?;
    info!("Loaded {} requirements from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reference formulas of a dataset, skipping rows whose `LTL` cell is blank
pub fn load_reference_formulas(path: &Path) -> BenchResult<Vec<Formula>> {
    let rows = load_requirements(path)?;
    let total = rows.len();
    let formulas: Vec<Formula> = rows
        .iter()
        .filter_map(RequirementRow::reference_formula)
        .collect();
    if formulas.len() < total {
        warn!("Skipped {} rows without a reference formula", total - formulas.len());
    }
    Ok(formulas)
}

/// Tokenized or plain text field of the lifted corpus
#[derive(Deserialize)]
#[serde(untagged)]
enum Words {
    Tokens(Vec<String>),
    Text(String),
}

impl Words {
    fn joined(self) -> String {
        match self {
            Words::Tokens(tokens) => tokens.join(" ").trim().to_string(),
            Words::Text(text) => text.trim().to_string(),
        }
    }
}

#[derive(Deserialize)]
struct LiftedLine {
    logic_sentence: Words,
    logic_ltl: Words,
}

/// Parse JSON lines carrying `logic_sentence` and `logic_ltl`, each either a
/// token list or a string. Blank lines are ignored; entries without a
/// reference formula are skipped.
pub fn parse_ltl_examples(contents: &str) -> BenchResult<Vec<LtlExample>> {
    let mut examples = Vec::new();
    let mut skipped = 0;
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: LiftedLine = serde_json
            ::from_str(line)
            .map_err(|e| BenchError::DatasetError(format!("line {}: {}", index + 1, e)))?;
        let example = LtlExample {
            nl: parsed.logic_sentence.joined(),
            ltl: parsed.logic_ltl.joined(),
        };
        if example.ltl.is_empty() {
            skipped += 1;
            continue;
        }
        examples.push(example);
    }
    if skipped > 0 {
        warn!("Skipped {} entries without a reference formula", skipped);
    }
    debug!("Parsed {} LTL examples", examples.len());
    Ok(examples)
}

/// Load the lifted LTL corpus from a JSON-lines file
pub fn load_ltl_examples(path: &Path) -> BenchResult<Vec<LtlExample>> {
    let examples = parse_ltl_examples(&open(path)?)?;
    info!("Loaded {} LTL examples from {}", examples.len(), path.display());
    Ok(examples)
}
