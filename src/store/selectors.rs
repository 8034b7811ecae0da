//! Read-only views over the store state used by the listing pages

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use super::StoreState;
use crate::models::{visible_faqs, Faq, ListingKind, Vehicle};

/// Filters from the sales page search form; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Case-insensitive substring of the make
    pub make: Option<String>,
    /// Case-insensitive substring of the model
    pub model: Option<String>,
    pub year: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(mut self, value: &str) -> Self {
        self.make = Some(value.to_string());
        self
    }

    pub fn model(mut self, value: &str) -> Self {
        self.model = Some(value.to_string());
        self
    }

    pub fn year(mut self, value: i32) -> Self {
        self.year = Some(value);
        self
    }

    pub fn price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        let details = &vehicle.details;
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(needle) if !needle.is_empty() => {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }
            _ => true,
        };

        contains(&details.make, &self.make)
            && contains(&details.model, &self.model)
            && self.year.map_or(true, |year| details.year == year)
            && self.min_price.map_or(true, |min| details.price >= min)
            && self.max_price.map_or(true, |max| details.price <= max)
    }
}

/// Choices for the cascading make / model / year dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Lowercased, sorted
    pub makes: Vec<String>,
    /// Lowercased models of the selected make, sorted
    pub models: Vec<String>,
    /// Newest first
    pub years: Vec<i32>,
}

impl StoreState {
    pub fn find_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn visible_faqs(&self) -> Vec<&Faq> {
        visible_faqs(&self.faqs)
    }

    pub fn featured_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.details.featured).collect()
    }

    pub fn sale_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.details.kind == ListingKind::Sale)
            .collect()
    }

    /// Rental listings, or nothing while rentals are switched off
    pub fn rental_vehicles(&self) -> Vec<&Vehicle> {
        if !self.settings.rental_enabled {
            return Vec::new();
        }
        self.vehicles
            .iter()
            .filter(|v| v.details.kind == ListingKind::Rental)
            .collect()
    }

    /// Sale vehicles marked as hot deals
    pub fn hot_deals(&self) -> Vec<&Vehicle> {
        self.sale_vehicles()
            .into_iter()
            .filter(|v| v.details.selling)
            .collect()
    }

    pub fn in_stock(&self) -> Vec<&Vehicle> {
        self.sale_vehicles()
            .into_iter()
            .filter(|v| v.details.in_stock)
            .collect()
    }

    pub fn search(&self, filters: &SearchFilters) -> Vec<&Vehicle> {
        self.sale_vehicles()
            .into_iter()
            .filter(|v| filters.matches(v))
            .collect()
    }

    /// Dropdown choices; models narrow by `make`, years by `make` and `model`
    pub fn search_options(&self, make: Option<&str>, model: Option<&str>) -> SearchOptions {
        let sale = self.sale_vehicles();
        let same = |value: &str, selected: Option<&str>| {
            selected.map_or(true, |selected| value.eq_ignore_ascii_case(selected))
        };

        let makes: BTreeSet<String> = sale.iter().map(|v| v.details.make.to_lowercase()).collect();

        let by_make: Vec<&&Vehicle> = sale.iter().filter(|v| same(&v.details.make, make)).collect();
        let models: BTreeSet<String> = by_make
            .iter()
            .map(|v| v.details.model.to_lowercase())
            .collect();

        let years: BTreeSet<i32> = by_make
            .iter()
            .filter(|v| same(&v.details.model, model))
            .map(|v| v.details.year)
            .collect();

        SearchOptions {
            makes: makes.into_iter().collect(),
            models: models.into_iter().collect(),
            years: years.into_iter().rev().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleDraft;

    fn vehicle(id: &str, make: &str, model: &str, year: i32, price: i64, kind: ListingKind) -> Vehicle {
        Vehicle::new(id, VehicleDraft::new(make, model, year, Decimal::new(price, 0), kind))
    }

    fn state() -> StoreState {
        let mut hot = vehicle("2", "Toyota", "Hilux", 2021, 30000, ListingKind::Sale);
        hot.details.selling = true;
        hot.details.featured = true;
        let mut sold = vehicle("3", "Honda", "Civic", 2018, 11000, ListingKind::Sale);
        sold.details.in_stock = false;

        StoreState {
            vehicles: vec![
                vehicle("1", "Toyota", "Corolla", 2020, 15000, ListingKind::Sale),
                hot,
                sold,
                vehicle("4", "Suzuki", "Swift", 2022, 0, ListingKind::Rental),
            ],
            ..StoreState::default()
        }
    }

    fn ids(vehicles: Vec<&Vehicle>) -> Vec<&str> {
        vehicles.into_iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn listing_views() {
        let state = state();
        assert_eq!(ids(state.sale_vehicles()), vec!["1", "2", "3"]);
        assert_eq!(ids(state.hot_deals()), vec!["2"]);
        assert_eq!(ids(state.in_stock()), vec!["1", "2"]);
        assert_eq!(ids(state.featured_vehicles()), vec!["2"]);
        assert_eq!(ids(state.rental_vehicles()), vec!["4"]);
        assert_eq!(state.find_vehicle("3").map(|v| v.title()), Some("2018 Honda Civic".to_string()));
    }

    #[test]
    fn rentals_hidden_when_disabled() {
        let mut state = state();
        state.settings.rental_enabled = false;
        assert!(state.rental_vehicles().is_empty());
    }

    #[test]
    fn search_filters_sale_vehicles() {
        let state = state();
        assert_eq!(ids(state.search(&SearchFilters::new().make("toy"))), vec!["1", "2"]);
        assert_eq!(ids(state.search(&SearchFilters::new().make("suzuki"))), Vec::<&str>::new());
        assert_eq!(ids(state.search(&SearchFilters::new().year(2018))), vec!["3"]);
        let priced = SearchFilters::new().price_range(Some(Decimal::new(12000, 0)), Some(Decimal::new(20000, 0)));
        assert_eq!(ids(state.search(&priced)), vec!["1"]);
    }

    #[test]
    fn search_options_cascade() {
        let state = state();
        let all = state.search_options(None, None);
        assert_eq!(all.makes, vec!["honda", "toyota"]);
        assert_eq!(all.years, vec![2021, 2020, 2018]);

        let toyota = state.search_options(Some("Toyota"), None);
        assert_eq!(toyota.models, vec!["corolla", "hilux"]);
        assert_eq!(toyota.years, vec![2021, 2020]);

        let hilux = state.search_options(Some("toyota"), Some("hilux"));
        assert_eq!(hilux.years, vec![2021]);
    }
}
