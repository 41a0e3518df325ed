use crate::models::{Category, CategoryCode, KnownDataflow, PopularDataset};

pub const SDMX_BASE_URL: &str = "https://sdmx.oecd.org/public/rest";
pub const DATA_EXPLORER_URL: &str = "https://data-explorer.oecd.org/vis";
pub const DOCUMENTATION_URL: &str = "https://data.oecd.org/";

/// Wire codes of every category, in catalog order.
pub const CATEGORY_CODES: [&str; 17] = [
    "ECO", "HEA", "EDU", "ENV", "TRD", "JOB", "NRG", "AGR", "GOV", "SOC", "DEV", "STI", "TAX",
    "FIN", "TRA", "IND", "REG",
];

// Example datasets only reference dataflows that are reachable through SDMX
// where possible; unresolved ids are skipped by the detailed category listing.
pub static CATEGORIES: [Category; 17] = [
    Category {
        id: CategoryCode::Eco,
        name: "Economy",
        description: "GDP, growth, inflation, interest rates, economic forecasts",
        example_datasets: &["QNA", "MEI"],
    },
    Category {
        id: CategoryCode::Hea,
        name: "Health",
        description: "Healthcare spending, life expectancy, health outcomes",
        example_datasets: &["HEALTH_STAT"],
    },
    Category {
        id: CategoryCode::Edu,
        name: "Education",
        description: "PISA results, education spending, educational attainment",
        example_datasets: &["EAG_FIN"],
    },
    Category {
        id: CategoryCode::Env,
        name: "Environment",
        description: "Climate, emissions, pollution, green growth, biodiversity",
        example_datasets: &[
            "DF_LAND_TEMP",
            "DF_HEAT_STRESS",
            "DF_COASTAL_FLOOD",
            "DF_RIVER_FLOOD",
            "DF_DROUGHT",
            "DF_FIRES",
            "DF_PRECIP",
            "DF_CLIM_PROJ",
            "GREEN_GROWTH",
        ],
    },
    Category {
        id: CategoryCode::Trd,
        name: "Trade",
        description: "International trade, imports, exports, trade agreements",
        example_datasets: &["TIS"],
    },
    Category {
        id: CategoryCode::Job,
        name: "Employment",
        description: "Labour market, unemployment, wages, working conditions",
        example_datasets: &["AVD_DUR"],
    },
    Category {
        id: CategoryCode::Nrg,
        name: "Energy",
        description: "Energy production, consumption, renewables, energy prices",
        example_datasets: &["IEA_ENERGY", "IEA_REN", "IEA_PRICES"],
    },
    Category {
        id: CategoryCode::Agr,
        name: "Agriculture and Fisheries",
        description: "Agricultural production, food security, fisheries",
        example_datasets: &["FISH_AQUA", "FISH_FLEET", "PSE"],
    },
    Category {
        id: CategoryCode::Gov,
        name: "Government",
        description: "Public sector, governance, trust in government, e-government",
        example_datasets: &["GOV_2023", "SNA_TABLE11", "GGDP"],
    },
    Category {
        id: CategoryCode::Soc,
        name: "Social Protection and Well-being",
        description: "Social spending, inequality, quality of life",
        example_datasets: &["SOCX_AGG", "IDD", "BLI"],
    },
    Category {
        id: CategoryCode::Dev,
        name: "Development",
        description: "Development aid, ODA, international cooperation",
        example_datasets: &["TABLE1", "TABLE2A", "CRS"],
    },
    Category {
        id: CategoryCode::Sti,
        name: "Innovation and Technology",
        description: "R&D spending, patents, digital economy, artificial intelligence",
        example_datasets: &["MSTI_PUB", "PATS_IPC", "ICT_ACCESS"],
    },
    Category {
        id: CategoryCode::Tax,
        name: "Taxation",
        description: "Tax revenues, tax rates, tax policy",
        example_datasets: &["REV", "CTS_CIT", "CTS_PIT"],
    },
    Category {
        id: CategoryCode::Fin,
        name: "Finance",
        description: "Financial markets, banking, insurance, pensions",
        example_datasets: &["FDI"],
    },
    Category {
        id: CategoryCode::Tra,
        name: "Transport",
        description: "Infrastructure, mobility, freight, passenger transport",
        example_datasets: &["ITF_GOODS", "ITF_PASSENGER", "ITF_INV"],
    },
    Category {
        id: CategoryCode::Ind,
        name: "Industry and Services",
        description: "Industrial production, services sector, productivity",
        example_datasets: &["PDB_LV", "SNA_TABLE6A", "STAN08BIS"],
    },
    Category {
        id: CategoryCode::Reg,
        name: "Regional Statistics",
        description: "Sub-national data, cities, regions, territorial indicators",
        example_datasets: &["REGION_DEMOGR", "REGION_ECONOM", "REGION_INNOV"],
    },
];

/// Dataflows verified to answer on the SDMX data endpoint.
pub static KNOWN_DATAFLOWS: [KnownDataflow; 11] = [
    KnownDataflow {
        id: "QNA",
        full_id: "DSD_NAMAIN1@DF_QNA",
        agency: "OECD.SDD.NAD",
        version: "1.0",
        name: "Quarterly National Accounts",
        description: "GDP and main aggregates - quarterly frequency. Includes GDP, consumption, investment, government spending by country and quarter.",
        category: CategoryCode::Eco,
    },
    KnownDataflow {
        id: "MEI",
        full_id: "DSD_STES@DF_CLI",
        agency: "OECD.SDD.STES",
        version: "1.0",
        name: "Main Economic Indicators - Composite Leading Indicators",
        description: "Composite Leading Indicators (CLI) designed to provide early signals of turning points in business cycles. Monthly frequency.",
        category: CategoryCode::Eco,
    },
    KnownDataflow {
        id: "HEALTH_STAT",
        full_id: "DSD_HEALTH_STAT@DF_PHS",
        agency: "OECD.ELS.HD",
        version: "1.0",
        name: "Health Statistics - Perceived Health Status",
        description: "Percentage of population aged 15+ reporting good/very good health status, by age and gender.",
        category: CategoryCode::Hea,
    },
    KnownDataflow {
        id: "DF_LAND_TEMP",
        full_id: "DSD_FUA_CLIM@DF_LAND_TEMP",
        agency: "OECD.CFE.EDS",
        version: "1.2",
        name: "Land surface temperature - Cities and FUAs",
        description: "Land surface temperature indicators in functional urban areas and cities",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_CLIM_PROJ",
        full_id: "DSD_FUA_CLIM@DF_CLIM_PROJ",
        agency: "OECD.CFE.EDS",
        version: "1.4",
        name: "Climate projections by scenario, 2030-2060 - Cities and FUAs",
        description: "Climate projections for cities based on different scenarios (SSP)",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_COASTAL_FLOOD",
        full_id: "DSD_FUA_CLIM@DF_COASTAL_FLOOD",
        agency: "OECD.CFE.EDS",
        version: "1.1",
        name: "Coastal flooding - Cities and FUAs",
        description: "Population and built-up exposure to coastal floods",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_DROUGHT",
        full_id: "DSD_FUA_CLIM@DF_DROUGHT",
        agency: "OECD.CFE.EDS",
        version: "1.2",
        name: "Drought - Cities and FUAs",
        description: "Soil moisture anomaly estimates in functional urban areas",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_FIRES",
        full_id: "DSD_FUA_CLIM@DF_FIRES",
        agency: "OECD.CFE.EDS",
        version: "1.1",
        name: "Wildfires - Cities and FUAs",
        description: "Population and land exposure to wildfires",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_HEAT_STRESS",
        full_id: "DSD_FUA_CLIM@DF_HEAT_STRESS",
        agency: "OECD.CFE.EDS",
        version: "1.1",
        name: "Heat stress - Cities and FUAs",
        description: "Population exposure to heat stress (UTCI index)",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_PRECIP",
        full_id: "DSD_FUA_CLIM@DF_PRECIP",
        agency: "OECD.CFE.EDS",
        version: "1.1",
        name: "Precipitation - FUAs",
        description: "Total precipitation and extreme precipitation days",
        category: CategoryCode::Env,
    },
    KnownDataflow {
        id: "DF_RIVER_FLOOD",
        full_id: "DSD_FUA_CLIM@DF_RIVER_FLOOD",
        agency: "OECD.CFE.EDS",
        version: "1.1",
        name: "River flooding - Cities and FUAs",
        description: "Population and built-up exposure to river floods",
        category: CategoryCode::Env,
    },
];

pub static POPULAR_DATASETS: [PopularDataset; 11] = [
    PopularDataset {
        id: "QNA",
        name: "Quarterly National Accounts",
        description: "AVAILABLE - GDP and main aggregates, quarterly frequency",
        category: CategoryCode::Eco,
    },
    PopularDataset {
        id: "MEI",
        name: "Main Economic Indicators",
        description: "AVAILABLE - Composite Leading Indicators (CLI), monthly frequency",
        category: CategoryCode::Eco,
    },
    PopularDataset {
        id: "HEALTH_STAT",
        name: "Health Statistics",
        description: "AVAILABLE - Perceived health status by age and gender",
        category: CategoryCode::Hea,
    },
    PopularDataset {
        id: "EO",
        name: "Economic Outlook",
        description: "NOT YET IMPLEMENTED - Economic projections and forecasts",
        category: CategoryCode::Eco,
    },
    PopularDataset {
        id: "PISA",
        name: "PISA Results",
        description: "NOT AVAILABLE via SDMX - Available as downloadable files only from OECD website",
        category: CategoryCode::Edu,
    },
    PopularDataset {
        id: "AVD_DUR",
        name: "Unemployment by Duration",
        description: "AVAILABLE - Average duration of unemployment in months",
        category: CategoryCode::Job,
    },
    PopularDataset {
        id: "EAG_FIN",
        name: "Education Finance",
        description: "AVAILABLE - Education spending per student by education level",
        category: CategoryCode::Edu,
    },
    PopularDataset {
        id: "TIS",
        name: "Trade in Services",
        description: "AVAILABLE - International trade in services by country",
        category: CategoryCode::Trd,
    },
    PopularDataset {
        id: "GREEN_GROWTH",
        name: "Green Growth Indicators",
        description: "AVAILABLE - Environmental and economic indicators for green growth monitoring",
        category: CategoryCode::Env,
    },
    PopularDataset {
        id: "FDI",
        name: "Foreign Direct Investment",
        description: "AVAILABLE - FDI flows and stocks by country and industry",
        category: CategoryCode::Fin,
    },
    PopularDataset {
        id: "REV",
        name: "Revenue Statistics",
        description: "NOT YET IMPLEMENTED - Tax revenues by type and government level",
        category: CategoryCode::Tax,
    },
];

/// Looks up a known dataflow by its short id.
#[must_use]
pub fn find_dataflow(id: &str) -> Option<&'static KnownDataflow> {
    KNOWN_DATAFLOWS.iter().find(|dataflow| dataflow.id == id)
}

/// Looks up the catalog entry of a category.
#[must_use]
pub fn find_category(code: CategoryCode) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == code)
}

/// Case-insensitive keyword search over known dataflows.
pub fn search_dataflows(query: &str) -> impl Iterator<Item = &'static KnownDataflow> {
    let needle = query.to_lowercase();
    KNOWN_DATAFLOWS
        .iter()
        .filter(move |dataflow| dataflow.matches_keyword(&needle))
}
