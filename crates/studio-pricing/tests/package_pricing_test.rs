use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use studio_pricing::domain::{
    BillingType, Catalog, CatalogCategory, CatalogItem, CatalogSection, ItemId, Package, PackageId,
    PackageLineItem, PackagePriceEngine, PriceConfig, PriceSource, RoundingStrategy,
    StandardMarginCalculator, UtilityType,
};
use studio_pricing::PricingError;

fn margins() -> PriceConfig {
    // 1.3x on services
    PriceConfig::new(dec!(0.3), dec!(0.2), dec!(0), dec!(0))
}

fn catalog(billing_type: BillingType) -> Catalog {
    Catalog::new(vec![CatalogSection {
        id: "coverage".to_string(),
        name: "Coverage".to_string(),
        categories: vec![CatalogCategory {
            id: "photo".to_string(),
            name: "Photography".to_string(),
            items: vec![CatalogItem::new(ItemId::new("photographer"), billing_type)],
        }],
    }])
}

fn photographer() -> Vec<PackageLineItem> {
    vec![PackageLineItem::new(
        ItemId::new("photographer"),
        1,
        dec!(1000),
        dec!(200),
        UtilityType::Service,
    )]
}

fn wedding(personalized: Decimal, base_hours: Option<Decimal>) -> Package {
    Package::new(PackageId::new("wedding-gold"), personalized, base_hours)
}

#[test]
fn test_matching_hours_use_personalized_price() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(dec!(18000), Some(dec!(7))),
            Some(dec!(7)),
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.final_price, dec!(18000));
    assert_eq!(result.base_price, dec!(18000));
    assert!(result.hours_match);
    assert_eq!(result.price_source, PriceSource::Personalized);
}

#[test]
fn test_mismatched_hours_recalculate_and_round() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(dec!(18000), Some(dec!(7))),
            Some(dec!(8)),
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.recalculated_price, Some(dec!(12480)));
    assert_eq!(result.final_price, dec!(12500));
    assert_eq!(result.base_price, dec!(18000));
    assert!(!result.hours_match);
    assert_eq!(result.price_source, PriceSource::Recalculated);
}

#[test]
fn test_missing_event_duration_keeps_personalized_price() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(dec!(18000), Some(dec!(7))),
            None,
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.final_price, dec!(18000));
    assert!(!result.hours_match);
    assert_eq!(result.price_source, PriceSource::Personalized);
}

#[test]
fn test_missing_base_hours_keeps_personalized_price() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(dec!(18000), None),
            Some(dec!(7)),
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.final_price, dec!(18000));
    assert!(!result.hours_match);
    assert_eq!(result.price_source, PriceSource::Personalized);
}

#[test]
fn test_no_personalized_price_forces_recalculation() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(Decimal::ZERO, Some(dec!(7))),
            Some(dec!(7)),
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.recalculated_price, Some(dec!(10920)));
    assert_eq!(result.final_price, dec!(11000));
    assert_eq!(result.base_price, Decimal::ZERO);
    assert!(result.hours_match);
    assert_eq!(result.price_source, PriceSource::Recalculated);
}

#[test]
fn test_flat_service_ignores_event_duration() {
    let result = PackagePriceEngine::new()
        .price(
            &wedding(dec!(18000), Some(dec!(7))),
            Some(dec!(8)),
            &photographer(),
            &catalog(BillingType::Service),
            &margins(),
        )
        .expect("pricing should succeed");

    assert_eq!(result.recalculated_price, Some(dec!(1560)));
    assert_eq!(result.final_price, dec!(1600));
    assert_eq!(result.price_source, PriceSource::Recalculated);
    assert_eq!(result.line_totals[0].multiplier, Decimal::ONE);
}

#[test]
fn test_zero_hours_behave_like_unset() {
    let engine = PackagePriceEngine::new();
    let package = wedding(dec!(18000), Some(dec!(7)));
    let items = photographer();
    let catalog = catalog(BillingType::Hour);

    let with_zero = engine
        .price(&package, Some(Decimal::ZERO), &items, &catalog, &margins())
        .unwrap();
    let with_none = engine
        .price(&package, None, &items, &catalog, &margins())
        .unwrap();
    assert_eq!(with_zero, with_none);

    let zero_base = wedding(dec!(18000), Some(Decimal::ZERO));
    let no_base = wedding(dec!(18000), None);
    assert_eq!(
        engine
            .price(&zero_base, Some(dec!(9)), &items, &catalog, &margins())
            .unwrap(),
        engine
            .price(&no_base, Some(dec!(9)), &items, &catalog, &margins())
            .unwrap()
    );
}

#[test]
fn test_alternate_rounding_strategy() {
    let engine = PackagePriceEngine::with_collaborators(
        StandardMarginCalculator,
        RoundingStrategy::None,
    );
    let result = engine
        .price(
            &wedding(dec!(18000), Some(dec!(7))),
            Some(dec!(8)),
            &photographer(),
            &catalog(BillingType::Hour),
            &margins(),
        )
        .unwrap();

    assert_eq!(result.final_price, dec!(12480));
    assert_eq!(result.recalculated_price, Some(dec!(12480)));
}

#[test]
fn test_unknown_item_fails_the_quote() {
    let err = PackagePriceEngine::new()
        .price(
            &wedding(Decimal::ZERO, None),
            Some(dec!(8)),
            &photographer(),
            &Catalog::default(),
            &margins(),
        )
        .unwrap_err();

    match err {
        PricingError::ClassificationNotFound { item_id } => assert_eq!(item_id, "photographer"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_margins_fail_the_quote() {
    let err = PackagePriceEngine::new()
        .price(
            &wedding(Decimal::ZERO, None),
            Some(dec!(8)),
            &photographer(),
            &catalog(BillingType::Hour),
            &PriceConfig::new(dec!(0.3), dec!(0.2), dec!(1), dec!(0)),
        )
        .unwrap_err();

    assert!(matches!(err, PricingError::InvalidMarginConfig(_)));
}

#[test]
fn test_concurrent_quotes_share_one_engine() {
    let engine = PackagePriceEngine::new();
    let items = photographer();
    let catalog = catalog(BillingType::Hour);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8)
            .map(|hours| {
                let engine = &engine;
                let items = &items;
                let catalog = &catalog;
                scope.spawn(move || {
                    engine
                        .price(
                            &wedding(Decimal::ZERO, None),
                            Some(Decimal::from(hours)),
                            items,
                            catalog,
                            &margins(),
                        )
                        .unwrap()
                })
            })
            .collect();

        for (hours, handle) in (1..=8).zip(handles) {
            let result = handle.join().unwrap();
            assert_eq!(
                result.recalculated_price,
                Some(dec!(1560) * Decimal::from(hours))
            );
        }
    });
}
