use country_sync::{map_document, MappingError, SyncSummary};

/// Trimmed REST Countries v3.1 entries, including the sparse ones.
fn restcountries_payload() -> serde_json::Value {
    serde_json::json!([
        {
            "name": {
                "common": "Switzerland",
                "official": "Swiss Confederation",
                "nativeName": {
                    "fra": {"official": "Confédération suisse", "common": "Suisse"},
                    "gsw": {"official": "Schweizerische Eidgenossenschaft", "common": "Schweiz"},
                    "ita": {"official": "Confederazione Svizzera", "common": "Svizzera"},
                    "roh": {"official": "Confederaziun svizra", "common": "Svizra"}
                }
            },
            "cca2": "CH",
            "currencies": {"CHF": {"name": "Swiss franc", "symbol": "Fr."}},
            "idd": {"root": "+4", "suffixes": ["1"]},
            "capital": ["Bern"],
            "region": "Europe",
            "subregion": "Western Europe",
            "languages": {"fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh"},
            "area": 41284.0,
            "population": 8654622
        },
        {
            "name": {"common": "Antarctica", "official": "Antarctica", "nativeName": {}},
            "cca2": "AQ",
            "currencies": {},
            "idd": {"root": "", "suffixes": []},
            "capital": [],
            "region": "Antarctic",
            "subregion": "",
            "languages": {},
            "area": 14000000.0,
            "population": 1000
        },
        {
            "name": {"common": "Heard Island and McDonald Islands"},
            "cca2": "HM",
            "region": "Antarctic",
            "area": 412.0
        },
        {
            "name": {
                "common": "Puerto Rico",
                "nativeName": {
                    "eng": {"common": "Puerto Rico"},
                    "spa": {"common": "Puerto Rico"}
                }
            },
            "cca2": "PR",
            "currencies": {"USD": {"name": "United States dollar", "symbol": "$"}},
            "idd": {"root": "+1", "suffixes": ["787", "939"]},
            "capital": ["San Juan"],
            "region": "Americas",
            "subregion": "Caribbean",
            "languages": {"eng": "English", "spa": "Spanish"},
            "area": 8870.0,
            "population": 3194034
        }
    ])
}

#[test]
fn test_map_restcountries_payload() {
    let records = map_document(&restcountries_payload()).unwrap();
    assert_eq!(records.len(), 4);

    let ch = &records[0];
    assert_eq!(ch.code.as_deref(), Some("CH"));
    assert_eq!(ch.name.as_deref(), Some("Switzerland"));
    assert_eq!(ch.native_name.as_deref(), Some("Suisse"));
    assert_eq!(ch.capital.as_deref(), Some("Bern"));
    assert_eq!(ch.phone_prefixes, vec!["+41"]);
    assert_eq!(ch.currencies, vec!["CHF"]);
    assert_eq!(ch.languages, vec!["fra", "gsw", "ita", "roh"]);

    let aq = &records[1];
    assert_eq!(aq.native_name, None);
    assert_eq!(aq.capital, None);
    assert_eq!(aq.subregion.as_deref(), Some(""));
    assert!(aq.phone_prefixes.is_empty());
    assert!(aq.currencies.is_empty());
    assert!(aq.languages.is_empty());
    assert_eq!(aq.population, 1000);

    let hm = &records[2];
    assert_eq!(hm.code.as_deref(), Some("HM"));
    assert_eq!(hm.population, 0);
    assert_eq!(hm.area, 412.0);
    assert_eq!(hm.region.as_deref(), Some("Antarctic"));
    assert_eq!(hm.subregion, None);

    let pr = &records[3];
    assert_eq!(pr.native_name.as_deref(), Some("Puerto Rico"));
    assert_eq!(pr.phone_prefixes, vec!["+1787", "+1939"]);
}

#[test]
fn test_expected_row_counts() {
    let records = map_document(&restcountries_payload()).unwrap();
    assert_eq!(
        SyncSummary::of_records(&records),
        SyncSummary {
            country_count: 4,
            phone_count: 3,
            currency_count: 2,
            language_count: 6,
        }
    );
}

#[test]
fn test_scalar_document_rejected() {
    assert_eq!(
        map_document(&serde_json::json!("Service Unavailable")).unwrap_err(),
        MappingError::NotAList { found: "string" }
    );
    assert_eq!(
        map_document(&serde_json::json!([null])).unwrap_err(),
        MappingError::NotAnObject {
            index: 0,
            found: "null"
        }
    );
}
