//! Tests for field catalog resolution and sharing

mod utils;

use std::sync::Arc;
use std::thread;

use rowmap::{Converter, ConverterConfig, FieldCatalog, FieldShape, Record, RecordType, record_map};
use utils::{Address, Contact, Person, init_logging, sample_person};

#[test]
fn test_descriptor_names_and_paths() {
    init_logging();
    let catalog = FieldCatalog::new();
    let entry = catalog.resolve::<Person>();

    let described: Vec<_> = entry
        .fields()
        .iter()
        .map(|field| (field.name.as_str(), field.ident, field.path.to_vec(), field.flatten))
        .collect();
    assert_eq!(
        described,
        [
            ("ID", "id", vec![0], false),
            ("myName", "name", vec![1], false),
            ("birth_date", "birth_date", vec![2], false),
            ("tags", "tags", vec![3], false),
            ("Address", "address", vec![4], true),
            ("contact", "contact", vec![5], true),
            ("previous_address", "previous_address", vec![6], false),
        ]
    );
    assert_eq!(entry.record_type(), RecordType::of::<Person>());
    assert_eq!(entry.record_type().name(), "Person");
}

#[test]
fn test_flat_index_covers_nested_fields() {
    let catalog = FieldCatalog::new();
    let entry = catalog.resolve::<Person>();
    let index = entry.flat_index(&catalog);

    assert_eq!(index.len(), 10);
    assert_eq!(index.exact("Address_Street").unwrap().path.as_slice(), &[4, 1]);
    assert_eq!(index.exact("contact_phone").unwrap().path.as_slice(), &[5, 1]);
    assert!(index.exact("Address").is_none());
    assert!(index.exact("contact").is_none());
}

#[test]
fn test_optional_flatten_shape() {
    let catalog = FieldCatalog::new();
    let entry = catalog.resolve::<Person>();

    let contact = entry.field("contact").unwrap();
    match contact.shape {
        FieldShape::OptionalRecord(record_type) => {
            assert_eq!(record_type, RecordType::of::<Contact>());
        }
        other => panic!("unexpected shape {other:?}"),
    }
    assert_eq!(
        Address::field_specs()
            .iter()
            .map(|spec| spec.external_name())
            .collect::<Vec<_>>(),
        ["City", "Street", "Zip"]
    );
}

#[test]
fn test_concurrent_first_resolution_builds_one_entry() {
    init_logging();
    let catalog = Arc::new(FieldCatalog::new());

    let entries: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || catalog.resolve::<Person>())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(catalog.len(), 1);
    assert!(entries.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_converters_share_a_catalog() {
    let catalog = Arc::new(FieldCatalog::new());
    let lenient = Converter::with_catalog(Arc::clone(&catalog), ConverterConfig::default());
    let strict = Converter::with_catalog(
        Arc::clone(&catalog),
        ConverterConfig::default().with_strict(true),
    );

    let mut person = sample_person();
    lenient.record_to_map(&mut person).unwrap();
    let resolved = catalog.len();
    assert!(catalog.contains::<Person>());

    let mut restored = Person::default();
    strict
        .map_to_record(&record_map! { "ID" => 1_i64 }, &mut restored)
        .unwrap();
    assert!(catalog.len() >= resolved);
    assert!(Arc::ptr_eq(strict.catalog(), lenient.catalog()));
}

#[test]
fn test_concurrent_conversions_share_entries() {
    let converter = Converter::new();

    thread::scope(|scope| {
        for id in 0..4_i64 {
            let converter = &converter;
            scope.spawn(move || {
                let mut person = Person::default();
                let map = record_map! { "ID" => id, "Address_City" => format!("city {id}") };
                converter.map_to_record(&map, &mut person).unwrap();
                assert_eq!(person.id, id);
                assert_eq!(person.address.city, format!("city {id}"));
            });
        }
    });

    assert!(converter.catalog().contains::<Person>());
    assert!(converter.catalog().contains::<Address>());
}

#[test]
fn test_reset_between_cases() {
    let converter = Converter::new();
    converter.register::<Person>();
    assert_eq!(converter.catalog().len(), 3);

    converter.catalog().reset();
    assert!(converter.catalog().is_empty());

    let mut person = sample_person();
    assert!(converter.value_to_map(&mut person).is_err());
    assert_eq!(converter.record_to_map(&mut person).unwrap().len(), 10);
}
