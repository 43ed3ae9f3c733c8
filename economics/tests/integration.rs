use ranger_core::Money;
use ranger_economics::*;
use std::sync::Arc;

fn m(s: &str) -> Money {
    s.parse().unwrap()
}

#[test]
fn test_fund_total_never_decreases() {
    let fund = EducationFund::new();
    let attempts = ["1.00", "-0.50", "0.00", "0.004", "0.005", "-10", "2.345"];

    let mut previous = fund.balance();
    for raw in attempts {
        let _ = fund.receive_tithe(m(raw), "mixed source");
        assert!(fund.balance() >= previous);
        previous = fund.balance();
    }
    assert_eq!(fund.balance(), m("3.36"));
}

#[test]
fn test_sale_tithes_flow_into_fund() {
    let fund = Arc::new(EducationFund::new());

    for (name, price) in [("Poster", "19.99"), ("Zine", "7.00"), ("Pin", "0.04")] {
        let dist = RevenueDistribution::from_price(m(price));
        fund.receive_tithe(dist.education_fund, &format!("purchase of {}", name))
            .unwrap();
    }

    // 2.00 + 0.70 + 0.00
    assert_eq!(fund.balance(), m("2.70"));
    assert_eq!(fund.contribution_count(), 3);
}

#[test]
fn test_distribution_json_shape() {
    let dist = RevenueDistribution::from_price(m("10"));
    let json = serde_json::to_value(&dist).unwrap();
    assert_eq!(json["creator"], "7.36");
    assert_eq!(json["education_fund"], "1.00");
    assert_eq!(json["rangeros_ops"], "0.64");
    assert_eq!(json["partners"], "0.50");
    assert!(json.get("operations").is_none());

    // Report keys match the labels printed by the host
    for (label, amount) in dist.entries() {
        assert_eq!(json[label], amount.to_string());
    }
}
