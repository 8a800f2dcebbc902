use super::*;
use crate::foundation::core::ImageSrc;

fn bike(id: &str) -> Bike {
    Bike {
        id: id.to_owned(),
        name: format!("Bike {id}"),
        brand: "Test".to_owned(),
        price: 100_000,
        image: ImageSrc::new(format!("/images/{id}.jpg")),
        images: vec![],
        colors: None,
        fuel_type: FuelType::Petrol,
        condition: Condition::New,
        mileage: 50.0,
        engine_capacity: Some(125.0),
        max_power: 10.0,
        max_speed: 100.0,
        weight: 110.0,
        fuel_tank_capacity: Some(10.0),
        battery_capacity: None,
        charging_time: None,
        range: None,
        odometer_km: None,
        real_world_mileage: None,
        eco_score: 7.0,
        is_upcoming: false,
        launch_date: None,
    }
}

#[test]
fn builtin_catalog_loads_all_sample_bikes() {
    let catalog = Catalog::load(&BuiltinCatalog).unwrap();
    assert_eq!(catalog.len(), 10);
    let ather = catalog.get("2").unwrap();
    assert_eq!(ather.bike.name, "Ather 450X");
    assert!(matches!(ather.kind, BikeKind::Used { .. }));
    assert_eq!(catalog.upcoming().count(), 1);
    assert_eq!(catalog.by_fuel(FuelType::Electric).count(), 4);
    assert_eq!(catalog.by_condition(Condition::Used).count(), 3);
}

#[test]
fn every_builtin_bike_has_colors_and_images() {
    let catalog = Catalog::load(&BuiltinCatalog).unwrap();
    for e in catalog.entries() {
        assert!(!e.bike.color_names().is_empty(), "bike {}", e.bike.id);
        assert!(!e.bike.base_gallery().is_empty(), "bike {}", e.bike.id);
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Catalog::from_bikes(vec![bike("1"), bike("1")]).unwrap_err();
    assert!(err.to_string().contains("duplicate bike id"));
}

#[test]
fn empty_color_list_is_rejected() {
    let mut b = bike("1");
    b.colors = Some(vec![]);
    assert!(Catalog::from_bikes(vec![b]).is_err());
}

#[test]
fn bike_without_images_still_loads() {
    let mut b = bike("1");
    b.image = ImageSrc::default();
    let catalog = Catalog::from_bikes(vec![b]).unwrap();
    assert!(catalog.get("1").unwrap().bike.base_gallery().is_empty());
    assert!(catalog.get("1").unwrap().bike.primary_image().is_none());
}

#[test]
fn base_gallery_skips_blank_entries_and_falls_back_to_primary() {
    let mut b = bike("1");
    b.images = vec![ImageSrc::new(""), ImageSrc::new("/a.jpg")];
    assert_eq!(b.base_gallery(), vec![ImageSrc::new("/a.jpg")]);

    b.images = vec![ImageSrc::new(" ")];
    assert_eq!(b.base_gallery(), vec![ImageSrc::new("/images/1.jpg")]);
}

#[test]
fn kind_labels_follow_condition_and_fuel() {
    let petrol = bike("1");
    assert_eq!(BikeKind::of(&petrol).efficiency_label(), "50 km/l");

    let mut ev = bike("2");
    ev.fuel_type = FuelType::Electric;
    ev.range = Some(105.0);
    assert_eq!(BikeKind::of(&ev).efficiency_label(), "105 km range");

    let mut used = bike("3");
    used.condition = Condition::Used;
    used.odometer_km = Some(12_000);
    used.real_world_mileage = Some(38.5);
    assert_eq!(
        BikeKind::of(&used).efficiency_label(),
        "12,000 km on odometer · 38.5 km/l"
    );

    let mut used_ev = ev.clone();
    used_ev.condition = Condition::Used;
    used_ev.range = None;
    assert_eq!(
        BikeKind::of(&used_ev),
        BikeKind::Used {
            odometer_km: 0,
            efficiency: UsedEfficiency::Unknown
        }
    );
}

#[test]
fn fuel_type_parse_is_case_insensitive() {
    assert_eq!(FuelType::parse("ELECTRIC"), Some(FuelType::Electric));
    assert_eq!(FuelType::parse(" petrol "), Some(FuelType::Petrol));
    assert_eq!(FuelType::parse("diesel"), None);
    assert_eq!(Condition::parse("Used"), Some(Condition::Used));
    assert_eq!(Condition::parse("refurbished"), None);
}

#[test]
fn builtin_color_map_lookup() {
    let map = ColorImageMap::builtin().unwrap();
    assert_eq!(
        map.get("2", "Mint Green").unwrap(),
        &[ImageSrc::new("/images/ather-450x-green.jpg")]
    );
    assert!(map.get("2", "Neon Pink").is_none());
    assert!(map.get("99", "White").is_none());
    assert_eq!(map.colors_for("1").count(), 4);
}

#[test]
fn json_file_catalog_reads_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bikes.json");
    std::fs::write(&path, serde_json::to_vec(&vec![bike("7")]).unwrap()).unwrap();
    let catalog = Catalog::load(&JsonFileCatalog::new(&path)).unwrap();
    assert_eq!(catalog.get("7").unwrap().bike.brand, "Test");

    std::fs::write(&path, b"{not json").unwrap();
    assert!(Catalog::load(&JsonFileCatalog::new(&path)).is_err());
}
