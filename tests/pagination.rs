use storefront_api::routes::params::Pagination;

#[test]
fn normalize_applies_defaults_and_clamps() {
    let (page, per_page, offset) = Pagination {
        page: None,
        per_page: None,
    }
    .normalize();
    assert_eq!((page, per_page, offset), (1, 20, 0));

    let (page, per_page, offset) = Pagination {
        page: Some(-5),
        per_page: Some(1000),
    }
    .normalize();
    assert_eq!((page, per_page, offset), (1, 100, 0));

    let (page, per_page, offset) = Pagination {
        page: Some(3),
        per_page: Some(10),
    }
    .normalize();
    assert_eq!((page, per_page, offset), (3, 10, 20));
}

// Query strings can carry any i64; the offset must saturate rather than
// overflow.
#[test]
fn normalize_survives_huge_page_numbers() {
    let (page, per_page, offset) = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    }
    .normalize();
    assert_eq!(page, i64::MAX);
    assert_eq!(per_page, 100);
    assert_eq!(offset, i64::MAX);
}
