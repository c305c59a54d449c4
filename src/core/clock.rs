use chrono::{Local, NaiveDate};

// Clock supplies the current calendar date for returns and status derivation.
pub trait Clock: Sync + Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::clock::{Clock, FixedClock};

    #[tokio::test]
    async fn test_should_return_fixed_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        assert_eq!(date, FixedClock::new(date).today());
    }
}
