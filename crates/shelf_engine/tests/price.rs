use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use shelf_core::Trend;
use shelf_engine::{
    sample_quote, PriceFetcher, PriceSettings, SyntheticPriceFetcher, NEW_PRICE_RANGE,
    USED_PRICE_RANGE,
};

const ISBN: &str = "9780134190440";
const TRIALS: usize = 1000;

#[test]
fn quotes_stay_within_bounds_and_trends_are_balanced() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let settings = PriceSettings::default();

    let mut new_up = 0;
    let mut used_up = 0;
    for _ in 0..TRIALS {
        let quote = sample_quote(&mut rng, ISBN, &settings);
        assert!(
            (10_000..30_000).contains(&quote.new_price),
            "new price {} out of range",
            quote.new_price
        );
        assert!(
            (5_000..20_000).contains(&quote.used_price),
            "used price {} out of range",
            quote.used_price
        );
        if quote.trend_new == Trend::Up {
            new_up += 1;
        }
        if quote.trend_used == Trend::Up {
            used_up += 1;
        }
    }

    // Both values show up, and each is near one half.
    for ups in [new_up, used_up] {
        assert!(ups > 0 && ups < TRIALS);
        assert!((400..=600).contains(&ups), "trend up count {ups} is biased");
    }
}

#[test]
fn range_constants_match_quote_contract() {
    assert_eq!(NEW_PRICE_RANGE, 10_000..30_000);
    assert_eq!(USED_PRICE_RANGE, 5_000..20_000);
}

#[test]
fn links_embed_the_isbn() {
    let mut rng = StdRng::seed_from_u64(7);
    let settings = PriceSettings {
        new_price_link_template: "https://shop.example/new?isbn={isbn}".to_string(),
        used_price_link_template: "https://shop.example/used/{isbn}".to_string(),
        ..PriceSettings::default()
    };

    let quote = sample_quote(&mut rng, ISBN, &settings);
    assert_eq!(quote.new_price_link, "https://shop.example/new?isbn=9780134190440");
    assert_eq!(quote.used_price_link, "https://shop.example/used/9780134190440");
}

#[test]
fn default_links_point_at_buy_and_used_searches() {
    let mut rng = StdRng::seed_from_u64(7);
    let quote = sample_quote(&mut rng, ISBN, &PriceSettings::default());

    assert!(quote.new_price_link.contains("vid=ISBN9780134190440"));
    assert!(quote.used_price_link.ends_with("?q=9780134190440"));
}

#[tokio::test]
async fn fetcher_waits_within_configured_delay() {
    let fetcher = SyntheticPriceFetcher::new(PriceSettings {
        min_delay: Duration::from_millis(20),
        max_delay: Duration::from_millis(40),
        ..PriceSettings::default()
    });

    let started = Instant::now();
    let quote = fetcher.fetch(ISBN).await.expect("synthetic quote");

    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(NEW_PRICE_RANGE.contains(&quote.new_price));
}

#[tokio::test]
async fn repeated_calls_are_independent() {
    let fetcher = SyntheticPriceFetcher::new(PriceSettings::immediate());

    let mut prices = Vec::new();
    for _ in 0..20 {
        prices.push(fetcher.fetch(ISBN).await.expect("quote").new_price);
    }

    prices.sort_unstable();
    prices.dedup();
    assert!(prices.len() > 1, "twenty identical quotes for one ISBN");
}
