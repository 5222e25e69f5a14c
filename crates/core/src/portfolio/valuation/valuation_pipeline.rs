use std::collections::BTreeMap;

use log::warn;
use rust_decimal::Decimal;

use crate::balances::SeriesKey;
use crate::fx::RateCache;
use crate::portfolio::reconstruction::DailySeries;
use crate::prices::PriceCache;

/// Values one reconstructed raw series into the target currency.
///
/// Per daily point: multiply by the security price when the series carries a
/// ticker, then by the conversion rate when the series currency differs from
/// the target. A point whose price or rate is unavailable is OMITTED, not
/// zeroed: zero would silently erase value from every total built on top.
/// Other series of the same account are unaffected by the omission.
pub async fn value_series(
    key: &SeriesKey,
    raw: &DailySeries,
    target_currency: &str,
    rates: &mut RateCache,
    prices: &mut PriceCache,
) -> DailySeries {
    let mut valued = DailySeries::new();
    let mut warned_missing_price = false;
    let mut warned_missing_rate = false;

    for (&date, &raw_value) in raw {
        let local_value = match &key.ticker {
            Some(symbol) => match prices.price_as_of(date, symbol).await {
                Some(price) => raw_value * price,
                None => {
                    if !warned_missing_price {
                        warn!(
                            "No price for {} at or before {}; omitting {}/{} points until one exists",
                            symbol, date, key.account_name, symbol
                        );
                        warned_missing_price = true;
                    }
                    continue;
                }
            },
            None => raw_value,
        };

        let converted = if key.currency == target_currency {
            local_value
        } else {
            match rates
                .rate_for_date(date, &key.currency, target_currency)
                .await
            {
                Some(rate) => local_value * rate,
                None => {
                    if !warned_missing_rate {
                        warn!(
                            "No rate {}->{} near {}; omitting affected {} points",
                            key.currency, target_currency, date, key.account_name
                        );
                        warned_missing_rate = true;
                    }
                    continue;
                }
            }
        };

        valued.insert(date, converted);
    }

    valued
}

/// Adds one valued series into its account's daily totals.
pub fn merge_account_series(
    accounts: &mut BTreeMap<String, DailySeries>,
    account_name: &str,
    valued: DailySeries,
) {
    let account = accounts.entry(account_name.to_string()).or_default();
    for (date, value) in valued {
        *account.entry(date).or_insert(Decimal::ZERO) += value;
    }
}
