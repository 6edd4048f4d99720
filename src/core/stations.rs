//=========================================================================
// Monitoring Stations
//=========================================================================
//
// Static records for the map view's monitoring stations.
//
// The prediction artifacts referenced here (chart PNG, labelled CSV) are
// produced offline by the external Prophet pipeline and served as-is;
// this crate only carries their references so the view can render the
// station popup and trigger a browser-native download. The game core
// never touches this data.
//
//=========================================================================

//=== StationKind =========================================================

/// Measurement class of a monitoring station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationKind {
    /// Rainfall (pluviométrica).
    Pluviometric,
    /// River flow (hidrológica).
    Hydrologic,
}

impl StationKind {
    /// Spanish label used by the map legend.
    pub fn label(self) -> &'static str {
        match self {
            StationKind::Pluviometric => "Pluviométrica",
            StationKind::Hydrologic => "Hidrológica",
        }
    }
}

//=== Station =============================================================

/// One hardcoded monitoring station of the reserve.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station code (e.g. `P43`).
    pub id: &'static str,
    pub kind: StationKind,
    pub name: &'static str,
    /// Geographic coordinate pair (decimal degrees).
    pub latitude: f64,
    pub longitude: f64,
    /// Pre-rendered 365-day forecast chart.
    pub forecast_chart: &'static str,
    /// Downloadable labelled forecast CSV.
    pub forecast_csv: &'static str,
}

//=== Station Records =====================================================

const STATIONS: [Station; 3] = [
    Station {
        id: "P43",
        kind: StationKind::Pluviometric,
        name: "Antisana Limboasi",
        latitude: -0.59348,
        longitude: -78.20825,
        forecast_chart: "/predicciones/Solo_Prediccion_Resaltada_P43.png",
        forecast_csv: "/predicciones/Prediccion_Prophet_Diaria_Etiquetada_P43.csv",
    },
    Station {
        id: "P42",
        kind: StationKind::Pluviometric,
        name: "Antisana Ramón Huañuna",
        latitude: -0.60228,
        longitude: -78.19867,
        forecast_chart: "/predicciones/Solo_Prediccion_Resaltada_P42.png",
        forecast_csv: "/predicciones/Prediccion_Prophet_Diaria_Etiquetada_P42.csv",
    },
    // Flow gauge at the Ramón Huañuna site, same location as P42
    Station {
        id: "H15",
        kind: StationKind::Hydrologic,
        name: "Ramón Huañuna Caudal",
        latitude: -0.60228,
        longitude: -78.19867,
        forecast_chart: "/predicciones/H15-Ramon_Huañuna_Caudal-PREDICCION_365DIAS.png",
        forecast_csv: "/predicciones/H15-Ramon_Huañuna_Caudal-PREDICCION_365DIAS.csv",
    },
];

/// Returns the fixed station list.
pub fn stations() -> &'static [Station] {
    &STATIONS
}

/// Looks up a station by its code.
pub fn station_by_id(id: &str) -> Option<&'static Station> {
    STATIONS.iter().find(|s| s.id == id)
}

//=========================================================================
// Unit Tests
//=========================================================================
