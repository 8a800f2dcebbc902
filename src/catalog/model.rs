use crate::foundation::core::ImageSrc;

/// Powertrain family of a catalog bike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FuelType {
    Petrol,
    Electric,
    Hybrid,
}

impl FuelType {
    /// Case-insensitive parse of the catalog spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" => Some(Self::Petrol),
            "electric" => Some(Self::Electric),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// Listing condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            _ => None,
        }
    }
}

/// Read-only catalog record, shaped like the JSON the bike data source serves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    pub id: String,
    pub name: String,
    pub brand: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Primary image; may be blank.
    #[serde(default)]
    pub image: ImageSrc,
    #[serde(default)]
    pub images: Vec<ImageSrc>,
    /// Human-readable color names, when the model is sold in several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub fuel_type: FuelType,
    pub condition: Condition,
    /// Rated fuel efficiency in km/l (0 for electrics).
    #[serde(default)]
    pub mileage: f64,
    /// Engine displacement in cc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<f64>,
    /// Peak power in PS.
    pub max_power: f64,
    /// Top speed in km/h.
    pub max_speed: f64,
    /// Kerb weight in kg.
    pub weight: f64,
    /// Fuel tank size in litres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_tank_capacity: Option<f64>,
    /// Battery capacity in kWh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_capacity: Option<f64>,
    /// Full charge time in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_time: Option<f64>,
    /// Rated electric range in km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    /// Odometer reading for used listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_km: Option<u64>,
    /// Observed efficiency for used listings, km/l.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_world_mileage: Option<f64>,
    /// 0..10 environmental score.
    #[serde(default)]
    pub eco_score: f64,
    #[serde(default)]
    pub is_upcoming: bool,
    /// Planned launch date (`YYYY-MM-DD`) for upcoming models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
}

impl Bike {
    /// Base gallery with blank entries removed, falling back to the primary image.
    ///
    /// Empty when the bike has no usable image at all; the presenter shows the placeholder then.
    pub fn base_gallery(&self) -> Vec<ImageSrc> {
        let images: Vec<ImageSrc> = self
            .images
            .iter()
            .filter(|s| !s.is_blank())
            .cloned()
            .collect();
        if !images.is_empty() {
            return images;
        }
        if self.image.is_blank() {
            Vec::new()
        } else {
            vec![self.image.clone()]
        }
    }

    /// Single best base image: the primary image, else the first gallery entry.
    pub fn primary_image(&self) -> Option<ImageSrc> {
        if !self.image.is_blank() {
            return Some(self.image.clone());
        }
        self.images.iter().find(|s| !s.is_blank()).cloned()
    }

    pub fn color_names(&self) -> &[String] {
        self.colors.as_deref().unwrap_or(&[])
    }

    /// The figure browse filters and sorts by: rated range in km for electrics, km/l otherwise.
    pub fn efficiency_figure(&self) -> f64 {
        match self.fuel_type {
            FuelType::Electric => self.range.unwrap_or(0.0),
            FuelType::Petrol | FuelType::Hybrid => self.mileage,
        }
    }
}

/// Efficiency figure known for a used listing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UsedEfficiency {
    /// Fuel efficiency in km/l.
    Kmpl(f64),
    /// Remaining electric range in km.
    RangeKm(f64),
    Unknown,
}

/// Display-relevant figures of a bike, resolved once when the catalog loads.
#[derive(Clone, Debug, PartialEq)]
pub enum BikeKind {
    NewPetrol {
        mileage_kmpl: f64,
        engine_cc: Option<f64>,
        tank_l: Option<f64>,
    },
    NewElectric {
        range_km: Option<f64>,
        battery_kwh: Option<f64>,
        charge_hours: Option<f64>,
    },
    NewHybrid {
        mileage_kmpl: f64,
        range_km: Option<f64>,
    },
    /// Any used listing.
    Used {
        odometer_km: u64,
        efficiency: UsedEfficiency,
    },
}

impl BikeKind {
    pub fn of(bike: &Bike) -> Self {
        match (bike.condition, bike.fuel_type) {
            (Condition::Used, fuel) => {
                let efficiency = match fuel {
                    FuelType::Electric => bike
                        .range
                        .filter(|r| *r > 0.0)
                        .map_or(UsedEfficiency::Unknown, UsedEfficiency::RangeKm),
                    FuelType::Petrol | FuelType::Hybrid => bike
                        .real_world_mileage
                        .or((bike.mileage > 0.0).then_some(bike.mileage))
                        .map_or(UsedEfficiency::Unknown, UsedEfficiency::Kmpl),
                };
                Self::Used {
                    odometer_km: bike.odometer_km.unwrap_or(0),
                    efficiency,
                }
            }
            (Condition::New, FuelType::Petrol) => Self::NewPetrol {
                mileage_kmpl: bike.mileage,
                engine_cc: bike.engine_capacity,
                tank_l: bike.fuel_tank_capacity,
            },
            (Condition::New, FuelType::Electric) => Self::NewElectric {
                range_km: bike.range,
                battery_kwh: bike.battery_capacity,
                charge_hours: bike.charging_time,
            },
            (Condition::New, FuelType::Hybrid) => Self::NewHybrid {
                mileage_kmpl: bike.mileage,
                range_km: bike.range,
            },
        }
    }

    /// The one efficiency string shown on cards and the detail view.
    pub fn efficiency_label(&self) -> String {
        match self {
            Self::NewPetrol { mileage_kmpl, .. } => format!("{} km/l", trim_num(*mileage_kmpl)),
            Self::NewElectric { range_km, .. } => match range_km {
                Some(r) => format!("{} km range", trim_num(*r)),
                None => "range n/a".to_owned(),
            },
            Self::NewHybrid {
                mileage_kmpl,
                range_km,
            } => match range_km {
                Some(r) => format!("{} km/l · {} km range", trim_num(*mileage_kmpl), trim_num(*r)),
                None => format!("{} km/l", trim_num(*mileage_kmpl)),
            },
            Self::Used {
                odometer_km,
                efficiency,
            } => {
                let odo = format!("{} km on odometer", group_thousands(*odometer_km));
                match efficiency {
                    UsedEfficiency::Kmpl(v) => format!("{odo} · {} km/l", trim_num(*v)),
                    UsedEfficiency::RangeKm(v) => format!("{odo} · {} km range", trim_num(*v)),
                    UsedEfficiency::Unknown => odo,
                }
            }
        }
    }
}

fn trim_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

pub(crate) fn group_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
