use log::{debug, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::{expand, Calendar, MeetingRecord, RowFailure};

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

/// Index of the first meeting table on the detailed schedule page. Meeting
/// tables then alternate with course information tables.
const FIRST_MEETING_TABLE: usize = 3;

/// The meeting rows of one course, as raw cell texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBlock {
    pub caption: String,
    pub rows: Vec<Vec<String>>,
}

fn text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn parse_schedule<S: AsRef<str>>(s: S) -> Vec<CourseBlock> {
    let html = Html::parse_document(s.as_ref());

    let mut captions = html
        .select(selector!("caption.captiontext"))
        .map(text)
        .filter(|caption| caption.contains('-'));

    let mut blocks = Vec::new();

    for table in html
        .select(selector!("table.datadisplaytable"))
        .skip(FIRST_MEETING_TABLE)
        .step_by(2)
    {
        let Some(caption) = captions.next() else {
            warn!("Found a meeting table without a course caption, ignoring it");
            break;
        };

        let rows = table
            .select(selector!("tr"))
            .map(|row| row.select(selector!("td.dddefault")).map(text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect::<Vec<_>>();

        debug!("{caption}: {} rows", rows.len());
        blocks.push(CourseBlock { caption, rows });
    }

    blocks
}

/// Expands every meeting row into events appended to `calendar`.
///
/// A row that fails validation is logged and skipped; the remaining rows are
/// still processed. The failures are returned for reporting.
pub fn build_calendar(
    blocks: &[CourseBlock],
    calendar: &mut Calendar,
    include_description: bool,
) -> Vec<RowFailure> {
    let mut failures = Vec::new();

    for block in blocks {
        for row in &block.rows {
            match MeetingRecord::from_cells(&block.caption, row) {
                Ok(Some(record)) => calendar.extend(expand(&record, include_description)),
                Ok(None) => debug!("{}: skipping row without a time range", block.caption),
                Err(error) => {
                    warn!("{}: skipping row, {error}", block.caption);
                    failures.push(RowFailure {
                        caption: block.caption.clone(),
                        error,
                    });
                }
            }
        }
    }

    failures
}
