use chrono::NaiveDate;
use std::fmt;

/// One spreadsheet row to transcribe.
///
/// Fields are `None` when the source cell was blank or uninterpretable;
/// nothing here ever infers a default. Built once by the extractor,
/// immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    pub date: Option<NaiveDate>,
    /// Signed amount in currency units; positive means income.
    pub amount: Option<i64>,
    pub large_category: Option<String>,
    pub middle_category: Option<String>,
    /// Free-text memo. May be the empty string, but must be present.
    pub content: Option<String>,
}

impl TransactionRecord {
    /// A record is complete iff none of the five fields is absent.
    pub fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.amount.is_some()
            && self.large_category.is_some()
            && self.middle_category.is_some()
            && self.content.is_some()
    }

    /// Converts into the unwrapped form the form driver consumes, or hands
    /// the record back so the caller can log the offending row.
    pub fn into_complete(self) -> Result<CompleteRecord, TransactionRecord> {
        match self {
            TransactionRecord {
                date: Some(date),
                amount: Some(amount),
                large_category: Some(large_category),
                middle_category: Some(middle_category),
                content: Some(content),
            } => Ok(CompleteRecord {
                date,
                amount,
                large_category,
                middle_category,
                content,
            }),
            incomplete => Err(incomplete),
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field(value: &Option<impl fmt::Display>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "<missing>".to_string(),
            }
        }
        write!(
            f,
            "date={} amount={} large_category={} middle_category={} content={}",
            field(&self.date),
            field(&self.amount),
            field(&self.large_category),
            field(&self.middle_category),
            match &self.content {
                Some(c) => format!("{c:?}"),
                None => "<missing>".to_string(),
            },
        )
    }
}

/// A record with all five fields present, ready for form entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteRecord {
    pub date: NaiveDate,
    pub amount: i64,
    pub large_category: String,
    pub middle_category: String,
    pub content: String,
}

impl CompleteRecord {
    /// Positive amounts post as income; zero and negative as expense.
    pub fn is_income(&self) -> bool {
        self.amount > 0
    }

    /// The magnitude entered into the amount field, sign stripped.
    pub fn entry_amount(&self) -> u64 {
        self.amount.unsigned_abs()
    }

    /// The date string the form's date field expects.
    pub fn form_date(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 7),
            amount: Some(-500),
            large_category: Some("Food".to_string()),
            middle_category: Some("Restaurant".to_string()),
            content: Some("Lunch".to_string()),
        }
    }

    #[test]
    fn complete_record_passes() {
        assert!(complete().is_complete());
        assert!(complete().into_complete().is_ok());
    }

    #[test]
    fn any_missing_field_is_incomplete() {
        let mut r = complete();
        r.date = None;
        assert!(!r.is_complete());

        let mut r = complete();
        r.amount = None;
        assert!(!r.is_complete());

        let mut r = complete();
        r.large_category = None;
        assert!(!r.is_complete());

        let mut r = complete();
        r.middle_category = None;
        assert!(!r.is_complete());

        let mut r = complete();
        r.content = None;
        assert!(!r.is_complete());
        assert!(r.into_complete().is_err());
    }

    #[test]
    fn empty_content_is_still_present() {
        let mut r = complete();
        r.content = Some(String::new());
        assert!(r.is_complete());
    }

    #[test]
    fn entry_amount_strips_the_sign() {
        let expense = complete().into_complete().unwrap();
        assert_eq!(expense.amount, -500);
        assert_eq!(expense.entry_amount(), 500);
        assert!(!expense.is_income());

        let mut income = complete();
        income.amount = Some(1200);
        let income = income.into_complete().unwrap();
        assert_eq!(income.entry_amount(), 1200);
        assert!(income.is_income());
    }

    #[test]
    fn form_date_uses_slashes_and_zero_padding() {
        let record = complete().into_complete().unwrap();
        assert_eq!(record.form_date(), "2024/03/07");
    }

    #[test]
    fn display_marks_missing_fields() {
        let mut r = complete();
        r.middle_category = None;
        let text = r.to_string();
        assert!(text.contains("middle_category=<missing>"));
        assert!(text.contains("large_category=Food"));
    }
}
