//! Shared test utilities and fixtures for location directory tests

use crate::app::services::location_directory::LocationDirectory;


/// Lookup table excerpt: two countries with subdivisions, one blank population
pub const LOOKUP_TABLE: &str = "\
UID,iso2,iso3,code3,FIPS,Admin2,Province_State,Country_Region,Lat,Long_,Combined_Key,Population
276,DE,DEU,276,,,,Germany,51.165691,10.451526,Germany,83149300
27601,DE,DEU,276,,,Baden-Wurttemberg,Germany,48.6616,9.3501,\"Baden-Wurttemberg, Germany\",11069533
27602,DE,DEU,276,,,Bavaria,Germany,48.7904,11.4979,\"Bavaria, Germany\",13076721
124,CA,CAN,124,,,,Canada,60.001,-95.001,Canada,37855702
12401,CA,CAN,124,,,Alberta,Canada,53.9333,-116.5765,\"Alberta, Canada\",4413146
12402,CA,CAN,124,,,British Columbia,Canada,53.7267,-127.6476,\"British Columbia, Canada\",5110917
10,AQ,ATA,10,,,,Antarctica,-71.9499,23.347,Antarctica,
";

/// Load the fixture table
pub fn fixture_directory() -> LocationDirectory {
    LocationDirectory::parse_reader(LOOKUP_TABLE.as_bytes(), "lookup.csv")
        .unwrap()
        .0
}
