//! End-to-end tests for the reconstruction engine facade: sparse records in,
//! dense converted daily series out.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::balances::{
    BalanceRecord, BalanceRepositoryTrait, BalanceService, BalanceServiceTrait, NewBalanceRecord,
};
use crate::errors::{Error, Result};
use crate::fx::{ExchangeRate, FxRepositoryTrait, RateLookupService};
use crate::portfolio::groups::GroupConfig;
use crate::portfolio::history::{
    BalanceHistoryService, BalanceHistoryServiceTrait, HistoryCache, HistoryQuery,
};
use crate::prices::{PriceLookupService, PriceRepositoryTrait, SecurityPrice};

const USER: &str = "user-1";

// =============================================================================
// Mock repositories
// =============================================================================

#[derive(Clone, Default)]
struct MockBalanceRepository {
    records: Arc<Mutex<Vec<BalanceRecord>>>,
}

#[async_trait]
impl BalanceRepositoryTrait for MockBalanceRepository {
    async fn insert(&self, record: BalanceRecord) -> Result<BalanceRecord> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_batch(&self, records: Vec<BalanceRecord>) -> Result<usize> {
        let count = records.len();
        self.records.lock().unwrap().extend(records);
        Ok(count)
    }

    async fn records_for_accounts(
        &self,
        user_id: &str,
        accounts: Option<&[String]>,
    ) -> Result<Vec<BalanceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| {
                accounts.map_or(true, |filter| filter.iter().any(|a| a == &r.account_name))
            })
            .cloned()
            .collect())
    }

    async fn list_account_names(&self, user_id: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.account_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

struct MockFxRepository {
    rates: Vec<ExchangeRate>,
}

#[async_trait]
impl FxRepositoryTrait for MockFxRepository {
    async fn rate_on(&self, date: NaiveDate, base: &str, target: &str) -> Result<Option<Decimal>> {
        Ok(self
            .rates
            .iter()
            .find(|r| r.date == date && r.base_currency == base && r.target_currency == target)
            .map(|r| r.rate))
    }

    async fn nearest_rate_before(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<Option<Decimal>> {
        Ok(self
            .rates
            .iter()
            .filter(|r| r.date <= date && r.base_currency == base && r.target_currency == target)
            .max_by_key(|r| r.date)
            .map(|r| r.rate))
    }

    async fn nearest_rate_after(
        &self,
        date: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<Option<Decimal>> {
        Ok(self
            .rates
            .iter()
            .filter(|r| r.date >= date && r.base_currency == base && r.target_currency == target)
            .min_by_key(|r| r.date)
            .map(|r| r.rate))
    }
}

struct MockPriceRepository {
    prices: Vec<SecurityPrice>,
}

#[async_trait]
impl PriceRepositoryTrait for MockPriceRepository {
    async fn latest_price_on_or_before(
        &self,
        date: NaiveDate,
        symbol: &str,
    ) -> Result<Option<Decimal>> {
        Ok(self
            .prices
            .iter()
            .filter(|p| p.symbol == symbol && p.date <= date)
            .max_by_key(|p| p.date)
            .map(|p| p.price))
    }
}

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    engine: BalanceHistoryService,
    ingestion: BalanceService,
}

fn fixture(
    records: Vec<BalanceRecord>,
    rates: Vec<ExchangeRate>,
    prices: Vec<SecurityPrice>,
) -> Fixture {
    let repository = Arc::new(MockBalanceRepository {
        records: Arc::new(Mutex::new(records)),
    });
    let cache = Arc::new(HistoryCache::new());

    let engine = BalanceHistoryService::new(
        repository.clone(),
        RateLookupService::new(Arc::new(MockFxRepository { rates })),
        PriceLookupService::new(Arc::new(MockPriceRepository { prices })),
        cache.clone(),
    );
    let ingestion = BalanceService::new(repository, cache);

    Fixture { engine, ingestion }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(account: &str, d: NaiveDate, balance: Decimal, currency: &str) -> BalanceRecord {
    BalanceRecord {
        account_name: account.to_string(),
        date: d,
        balance,
        currency: currency.to_string(),
        ticker: None,
        user_id: USER.to_string(),
    }
}

fn ticker_record(
    account: &str,
    d: NaiveDate,
    units: Decimal,
    currency: &str,
    symbol: &str,
) -> BalanceRecord {
    BalanceRecord {
        ticker: Some(symbol.to_string()),
        ..record(account, d, units, currency)
    }
}

fn rate(base: &str, target: &str, value: Decimal, d: NaiveDate) -> ExchangeRate {
    ExchangeRate {
        date: d,
        base_currency: base.to_string(),
        target_currency: target.to_string(),
        rate: value,
    }
}

fn price(symbol: &str, value: Decimal, d: NaiveDate) -> SecurityPrice {
    SecurityPrice {
        date: d,
        symbol: symbol.to_string(),
        price: value,
    }
}

fn query(start: NaiveDate, end: NaiveDate) -> HistoryQuery {
    HistoryQuery {
        user_id: USER.to_string(),
        start,
        end,
        accounts: None,
        target_currency: "CAD".to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn chequing_midpoint_is_interpolated_exactly() {
    let fixture = fixture(
        vec![
            record("Chequing", date(2024, 1, 1), dec!(1000), "CAD"),
            record("Chequing", date(2024, 1, 11), dec!(1200), "CAD"),
        ],
        vec![],
        vec![],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 11)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    let chequing = &response["Chequing"];
    assert_eq!(chequing.len(), 11);
    assert_eq!(chequing.get(&date(2024, 1, 6)), Some(&dec!(1100)));

    // Synthetic groups cover the lone account.
    assert_eq!(response["networth"].get(&date(2024, 1, 6)), Some(&dec!(1100)));
    assert_eq!(response["total"].get(&date(2024, 1, 6)), Some(&dec!(1100)));
}

#[tokio::test]
async fn ticker_units_step_while_prices_move_daily() {
    let fixture = fixture(
        vec![
            ticker_record("Margin", date(2024, 1, 1), dec!(10), "CAD", "VTI"),
            ticker_record("Margin", date(2024, 1, 3), dec!(15), "CAD", "VTI"),
        ],
        vec![],
        vec![
            price("VTI", dec!(100), date(2024, 1, 1)),
            price("VTI", dec!(110), date(2024, 1, 2)),
            price("VTI", dec!(120), date(2024, 1, 3)),
        ],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 3)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    let margin = &response["Margin"];
    // Unit count steps (10 until the next observation); each day is valued
    // at that day's price.
    assert_eq!(margin.get(&date(2024, 1, 1)), Some(&dec!(1000)));
    assert_eq!(margin.get(&date(2024, 1, 2)), Some(&dec!(1100)));
    assert_eq!(margin.get(&date(2024, 1, 3)), Some(&dec!(1800)));
}

#[tokio::test]
async fn foreign_cash_uses_reciprocal_rate() {
    let fixture = fixture(
        vec![record("US Savings", date(2024, 1, 1), dec!(1000), "USD")],
        // Only the reverse pair is stored.
        vec![rate("CAD", "USD", dec!(0.8), date(2024, 1, 1))],
        vec![],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 1)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        response["US Savings"].get(&date(2024, 1, 1)),
        Some(&dec!(1250))
    );
}

#[tokio::test]
async fn non_pivot_target_composes_through_the_pivot() {
    let fixture = fixture(
        vec![record("US Savings", date(2024, 1, 1), dec!(100), "USD")],
        vec![
            rate("USD", "CAD", dec!(1.4), date(2024, 1, 1)),
            rate("CAD", "EUR", dec!(0.7), date(2024, 1, 1)),
        ],
        vec![],
    );

    let mut q = query(date(2024, 1, 1), date(2024, 1, 1));
    q.target_currency = "EUR".to_string();
    let response = fixture
        .engine
        .history(&q, &GroupConfig::default())
        .await
        .unwrap();

    assert_eq!(response["US Savings"].get(&date(2024, 1, 1)), Some(&dec!(98)));
}

#[tokio::test]
async fn missing_rate_omits_one_series_without_losing_the_rest() {
    let fixture = fixture(
        vec![
            record("Mixed", date(2024, 1, 1), dec!(1000), "CAD"),
            record("Mixed", date(2024, 1, 1), dec!(9000), "JPY"),
        ],
        vec![],
        vec![],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 1)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    // The JPY series has no usable rate; its contribution is omitted, not
    // zeroed, and the CAD series survives.
    assert_eq!(response["Mixed"].get(&date(2024, 1, 1)), Some(&dec!(1000)));
}

#[tokio::test]
async fn duplicate_records_are_additive() {
    let fixture = fixture(
        vec![
            record("Chequing", date(2024, 1, 1), dec!(600), "CAD"),
            record("Chequing", date(2024, 1, 1), dec!(400), "CAD"),
        ],
        vec![],
        vec![],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 1)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(response["Chequing"].get(&date(2024, 1, 1)), Some(&dec!(1000)));
}

#[tokio::test]
async fn account_filter_limits_the_response() {
    let fixture = fixture(
        vec![
            record("Chequing", date(2024, 1, 1), dec!(1000), "CAD"),
            record("Savings", date(2024, 1, 1), dec!(5000), "CAD"),
        ],
        vec![],
        vec![],
    );

    let mut q = query(date(2024, 1, 1), date(2024, 1, 1));
    q.accounts = Some(vec!["Chequing".to_string()]);
    let response = fixture
        .engine
        .history(&q, &GroupConfig::default())
        .await
        .unwrap();

    assert!(response.contains_key("Chequing"));
    assert!(!response.contains_key("Savings"));
    assert_eq!(response["networth"].get(&date(2024, 1, 1)), Some(&dec!(1000)));
}

#[tokio::test]
async fn group_total_equals_sum_of_converted_members() {
    let fixture = fixture(
        vec![
            record("Chequing", date(2024, 1, 1), dec!(1000), "CAD"),
            record("US Savings", date(2024, 1, 1), dec!(100), "USD"),
        ],
        vec![rate("USD", "CAD", dec!(1.4), date(2024, 1, 1))],
        vec![],
    );

    let config = GroupConfig {
        groups: [(
            "operating".to_string(),
            vec![
                "Chequing".to_string(),
                "US Savings".to_string(),
                "Missing".to_string(),
            ],
        )]
        .into_iter()
        .collect(),
        ..GroupConfig::default()
    };

    let response = fixture
        .engine
        .history(&query(date(2024, 1, 1), date(2024, 1, 1)), &config)
        .await
        .unwrap();

    let expected = response["Chequing"][&date(2024, 1, 1)] + response["US Savings"][&date(2024, 1, 1)];
    assert_eq!(response["operating"].get(&date(2024, 1, 1)), Some(&expected));
    assert_eq!(expected, dec!(1140));
}

#[tokio::test]
async fn total_group_respects_the_ignore_list() {
    let fixture = fixture(
        vec![
            record("Chequing", date(2024, 1, 1), dec!(1000), "CAD"),
            record("Bridge", date(2024, 1, 1), dec!(250), "CAD"),
        ],
        vec![],
        vec![],
    );

    let config = GroupConfig {
        ignored_for_total: vec!["Bridge".to_string()],
        ..GroupConfig::default()
    };

    let response = fixture
        .engine
        .history(&query(date(2024, 1, 1), date(2024, 1, 1)), &config)
        .await
        .unwrap();

    assert_eq!(response["networth"].get(&date(2024, 1, 1)), Some(&dec!(1250)));
    assert_eq!(response["total"].get(&date(2024, 1, 1)), Some(&dec!(1000)));
}

#[tokio::test]
async fn user_without_records_gets_an_empty_map() {
    let fixture = fixture(vec![], vec![], vec![]);

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 31)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    assert!(response.is_empty());
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let fixture = fixture(vec![], vec![], vec![]);

    let result = fixture
        .engine
        .history(
            &query(date(2024, 2, 1), date(2024, 1, 1)),
            &GroupConfig::default(),
        )
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn reconstruction_is_a_pure_function_of_its_inputs() {
    let records = vec![
        record("Chequing", date(2024, 1, 1), dec!(1000), "CAD"),
        record("Chequing", date(2024, 1, 11), dec!(1200), "CAD"),
    ];
    let first = fixture(records.clone(), vec![], vec![]);
    let second = fixture(records, vec![], vec![]);

    let q = query(date(2024, 1, 1), date(2024, 1, 11));
    let from_first = first.engine.history(&q, &GroupConfig::default()).await.unwrap();
    let from_second = second.engine.history(&q, &GroupConfig::default()).await.unwrap();

    assert_eq!(*from_first, *from_second);

    // The same engine serves the identical query straight from cache.
    let replay = first.engine.history(&q, &GroupConfig::default()).await.unwrap();
    assert!(Arc::ptr_eq(&from_first, &replay));
}

#[tokio::test]
async fn ingestion_invalidates_the_cache() {
    let fixture = fixture(
        vec![record("Chequing", date(2024, 1, 1), dec!(1000), "CAD")],
        vec![],
        vec![],
    );
    let q = query(date(2024, 1, 1), date(2024, 1, 2));

    let before = fixture
        .engine
        .history(&q, &GroupConfig::default())
        .await
        .unwrap();
    // Jan 2 is forward-filled from the only observation.
    assert_eq!(before["Chequing"].get(&date(2024, 1, 2)), Some(&dec!(1000)));

    fixture
        .ingestion
        .add_balance(NewBalanceRecord {
            account_name: "Chequing".to_string(),
            date: date(2024, 1, 2),
            balance: dec!(1500),
            currency: "CAD".to_string(),
            ticker: None,
            user_id: USER.to_string(),
        })
        .await
        .unwrap();

    let after = fixture
        .engine
        .history(&q, &GroupConfig::default())
        .await
        .unwrap();
    assert_eq!(after["Chequing"].get(&date(2024, 1, 2)), Some(&dec!(1500)));
}

#[tokio::test]
async fn response_serializes_with_iso_date_keys() {
    let fixture = fixture(
        vec![record("Chequing", date(2024, 1, 1), dec!(1000), "CAD")],
        vec![],
        vec![],
    );

    let response = fixture
        .engine
        .history(
            &query(date(2024, 1, 1), date(2024, 1, 1)),
            &GroupConfig::default(),
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&*response).unwrap();
    assert_eq!(json["Chequing"]["2024-01-01"], serde_json::json!(1000.0));
}
