//! Shared test utilities and fixtures for time series parser tests

use std::fs;
use std::path::{Path, PathBuf};

pub mod field_parsers_tests;

/// Global series with a province split (Canada) and a blank count
pub const GLOBAL_SERIES: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
,Germany,51.165691,10.451526,1,4,4
Alberta,Canada,53.9333,-116.5765,0,,2
British Columbia,Canada,53.7267,-127.6476,3,5,6
";

/// US confirmed series (dates from column 11)
pub const US_CONFIRMED_SERIES: &str = "\
UID,iso2,iso3,code3,FIPS,Admin2,Province_State,Country_Region,Lat,Long_,Combined_Key,1/22/20,1/23/20
84001001,US,USA,840,1001.0,Autauga,Alabama,US,32.53952745,-86.64408227,\"Autauga, Alabama, US\",2,5
84001003,US,USA,840,1003.0,Baldwin,Alabama,US,30.72774991,-87.72207058,\"Baldwin, Alabama, US\",0,1
";

/// US deaths series (population at column 11, dates from column 12)
pub const US_DEATHS_SERIES: &str = "\
UID,iso2,iso3,code3,FIPS,Admin2,Province_State,Country_Region,Lat,Long_,Combined_Key,Population,1/22/20,1/23/20
84001001,US,USA,840,1001.0,Autauga,Alabama,US,32.53952745,-86.64408227,\"Autauga, Alabama, US\",55869,0,1
84001003,US,USA,840,1003.0,Baldwin,Alabama,US,30.72774991,-87.72207058,\"Baldwin, Alabama, US\",,0,0
";

/// Write a fixture file into `dir`
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
