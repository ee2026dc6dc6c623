// ==========================================
// 导入器集成测试
// ==========================================
// 测试目标: CSV → RetailNetwork 完整导入管道
// 覆盖范围: 正常导入、引用完整性、类型错误、缺列、主键重复
// ==========================================


use retail_sim::domain::ModelError;
use retail_sim::importer::{ImportError, InputTable, NetworkImporter};
use tempfile::TempDir;
use test_helpers::{
    assert_close, write_dataset, write_default_dataset, BRANDS_CSV, CLASSES_CSV, STORES_CSV,
    ZONES_CSV,
};

#[test]
fn test_import_default_dataset() {
    let dir = TempDir::new().unwrap();
    let paths = write_default_dataset(dir.path());

    let imported = NetworkImporter::new().import(&paths).unwrap();
    let network = &imported.network;

    assert_eq!(network.brands().len(), 3);
    assert_eq!(network.classifications().len(), 2);
    assert_eq!(network.zones().len(), 4);
    assert_eq!(network.stores().len(), 3);
    assert_eq!(network.brand("Asda").unwrap().observed_share, Some(0.3));
    assert_eq!(network.store("Tesco_01").unwrap().floorspace_sqft, 30000.0);
    assert_close(imported.report.total_expenditure, 43000.0, 1e-12);
    assert!(imported.report.warnings.is_empty());
    assert!(!imported.report.batch_id.is_empty());
}

#[test]
fn test_zone_with_unknown_class_fails_integrity() {
    let dir = TempDir::new().unwrap();
    let zones = "OA11CD,expenditure,oac,c_easting,c_northing\n\
E00000001,12000,1,0,0\n\
E00000002,9000,5,1500,0\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, zones, STORES_CSV);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    match err {
        ImportError::Integrity(ModelError::UnknownClassification { zone_code, class_code }) => {
            assert_eq!(zone_code, "E00000002");
            assert_eq!(class_code, "5");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_store_with_unknown_brand_fails_integrity() {
    let dir = TempDir::new().unwrap();
    let stores = "name,brand,easting,northing,footage\nLidl_01,Lidl,500,200,8000\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, ZONES_CSV, stores);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Integrity(ModelError::UnknownBrand { ref store_id, .. }) if store_id == "Lidl_01"
    ));
}

#[test]
fn test_non_numeric_footage_reports_row() {
    let dir = TempDir::new().unwrap();
    let stores = "name,brand,easting,northing,footage\n\
Tesco_01,Tesco,500,200,30000\n\
Asda_01,Asda,1600,700,huge\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, ZONES_CSV, stores);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    match err {
        ImportError::TypeConversionError { table, row, field, .. } => {
            assert_eq!(table, InputTable::Stores.to_string());
            assert_eq!(row, 3);
            assert_eq!(field, "footage");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_required_column() {
    let dir = TempDir::new().unwrap();
    let zones = "OA11CD,expenditure,c_easting,c_northing\nE00000001,12000,0,0\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, zones, STORES_CSV);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingColumn { ref table, ref column } if table == "zones" && column == "oac"
    ));
}

#[test]
fn test_empty_required_field() {
    let dir = TempDir::new().unwrap();
    let zones = "OA11CD,expenditure,oac,c_easting,c_northing\nE00000001,,1,0,0\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, zones, STORES_CSV);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingField { row: 2, ref field, .. } if field == "expenditure"
    ));
}

#[test]
fn test_duplicate_store_name() {
    let dir = TempDir::new().unwrap();
    let stores = "name,brand,easting,northing,footage\n\
Tesco_01,Tesco,500,200,30000\n\
Tesco_01,Tesco,900,200,10000\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, ZONES_CSV, stores);

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    assert!(matches!(err, ImportError::DuplicateKey { row: 3, ref key, .. } if key == "Tesco_01"));
}

#[test]
fn test_classification_from_average_distance() {
    let dir = TempDir::new().unwrap();
    let classes = "class_no,name,avg_distance_km\n1,Rural Residents,5.0\n2,Cosmopolitans,2.0\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, classes, ZONES_CSV, STORES_CSV);

    let imported = NetworkImporter::new().import(&paths).unwrap();
    let rural = imported.network.classification("1").unwrap();
    assert_close(rural.beta, 0.2, 1e-12);
    assert_eq!(rural.avg_distance_km, Some(5.0));
}

#[test]
fn test_zero_floorspace_store_is_warning_only() {
    let dir = TempDir::new().unwrap();
    let stores = "name,brand,easting,northing,footage\n\
Tesco_01,Tesco,500,200,30000\n\
Asda_01,Asda,1600,700,0\n";
    let paths = write_dataset(dir.path(), BRANDS_CSV, CLASSES_CSV, ZONES_CSV, stores);

    let imported = NetworkImporter::new().import(&paths).unwrap();
    assert_eq!(imported.report.warnings.len(), 1);
    assert_eq!(imported.report.warnings[0].table, InputTable::Stores);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut paths = write_default_dataset(dir.path());
    paths.stores = dir.path().join("nope.csv");

    let err = NetworkImporter::new().import(&paths).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
