//! Registry of the upstream climate datasets.

/// An upstream source handled by the pipeline.
///
/// `header_skip` is the number of junk lines before the real header row.
/// The GISTEMP table downloads carry one line of title text; the zonal
/// and CO2 files start directly at the header.
#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    pub name: &'static str,
    pub url: &'static str,
    pub header_skip: usize,
}

pub static DATASETS: [Dataset; 4] = [
    Dataset {
        name: "global",
        url: "https://data.giss.nasa.gov/gistemp/tabledata_v4/GLB.Ts+dSST.csv",
        header_skip: 1,
    },
    Dataset {
        name: "hemispheric",
        url: "https://data.giss.nasa.gov/gistemp/tabledata_v4/NH.Ts+dSST.csv",
        header_skip: 1,
    },
    Dataset {
        name: "zonal",
        url: "https://data.giss.nasa.gov/gistemp/tabledata_v4/ZonAnn.Ts+dSST.csv",
        header_skip: 0,
    },
    Dataset {
        name: "co2",
        url: "https://gml.noaa.gov/webdata/ccgg/trends/co2/co2_annmean_mlo.csv",
        header_skip: 0,
    },
];

impl Dataset {
    pub fn raw_file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    pub fn by_name(name: &str) -> Option<&'static Dataset> {
        DATASETS.iter().find(|d| d.name == name)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_register_all_sources() {
        assert_eq!(DATASETS.len(), 4);

        let names: Vec<&str> = DATASETS.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["global", "hemispheric", "zonal", "co2"]);

        for dataset in &DATASETS {
            assert!(dataset.url.starts_with("https://"));
        }
    }

    #[test]
    fn should_make_raw_file_name() {
        let dataset = Dataset::by_name("global").unwrap();
        assert_eq!(dataset.raw_file_name(), "global.csv");
    }

    #[test]
    fn should_skip_title_line_for_gistemp_tables() {
        assert_eq!(Dataset::by_name("global").unwrap().header_skip, 1);
        assert_eq!(Dataset::by_name("zonal").unwrap().header_skip, 0);
        assert!(Dataset::by_name("unknown").is_none());
    }
}
