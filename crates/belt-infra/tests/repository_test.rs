//! File repository tests against real files on disk

use std::fs;

use belt_domain::repository::{VehicleRepository, WorkshopRepository};
use belt_infra::persistence::{FileVehicleRepository, FileWorkshopRepository};
use belt_types::Error;
use tempfile::tempdir;

#[test]
fn test_open_workshops_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workshops.csv");
    fs::write(
        &path,
        "Workshop,Latitude,Longitude\nAndheri,19.1136,72.8697\nBad,x,y\n",
    )
    .unwrap();

    let mut repo = FileWorkshopRepository::open(&path).unwrap();
    assert_eq!(repo.find_all().unwrap().len(), 1);
    assert_eq!(repo.load_report().source, "workshops.csv");
    assert_eq!(repo.load_report().invalid_coordinate_count(), 1);

    fs::write(
        &path,
        "Workshop,Latitude,Longitude\nAndheri,19.1136,72.8697\nVashi,19.0771,72.9986\n",
    )
    .unwrap();
    repo.reload().unwrap();
    assert_eq!(repo.find_all().unwrap().len(), 2);
    assert_eq!(repo.load_report().rejected_count(), 0);
}

#[test]
fn test_open_vehicles_windows_1252() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projections.csv");
    // 0xE9 is "é" in Windows-1252 and invalid on its own in UTF-8
    let mut bytes = b"VIN,Latitude,Longitude,Pincode\nMA1,19.0,72.8,Caf".to_vec();
    bytes.push(0xE9);
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();

    let repo = FileVehicleRepository::open(&path).unwrap();
    let vehicles = repo.find_all().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].vin, "MA1");
    assert_eq!(vehicles[0].pincode.as_deref(), Some("Café"));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = FileVehicleRepository::open(&dir.path().join("nope.csv"));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_missing_columns_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workshops.csv");
    fs::write(&path, "Name,Lat\nA,1\n").unwrap();

    match FileWorkshopRepository::open(&path) {
        Err(Error::MissingColumns { missing, file, .. }) => {
            assert_eq!(missing, vec!["workshop lon"]);
            assert_eq!(file, "workshops.csv");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected missing column error"),
    }
}
