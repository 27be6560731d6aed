//! Almacén en memoria
//!
//! Implementa los mismos repositorios que PostgreSQL sobre mapas protegidos
//! por un `RwLock`. Se usa en los tests y con `DATABASE_URL=memory://`.
//! `set_connected(false)` simula una base de datos caída.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Car, Driver, DriverStatus, NewCar, NewDriver, NewTerm, Term};
use crate::repositories::{
    CarRepository, DatabaseHealth, DriverRepository, TermRepository,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    next_id: i64,
    cars: BTreeMap<i64, Car>,
    drivers: BTreeMap<i64, Driver>,
    terms: BTreeMap<i64, Term>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct InMemoryStore {
    tables: RwLock<Tables>,
    connected: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            connected: AtomicBool::new(true),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
    }
}

/// Más recientes primero; el id desempata filas creadas en el mismo instante
fn newest_first<T, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> (chrono::DateTime<Utc>, i64),
{
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl DatabaseHealth for InMemoryStore {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Car>> {
        self.check()?;
        let mut cars: Vec<Car> = self.tables.read().await.cars.values().cloned().collect();
        newest_first(&mut cars, |c| (c.created_at, c.id));
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Car>> {
        self.check()?;
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Car>> {
        self.check()?;
        let needle = query.to_lowercase();
        let mut cars: Vec<Car> = self
            .tables
            .read()
            .await
            .cars
            .values()
            .filter(|c| c.available)
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.model.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        cars.sort_by(|a, b| a.price_per_day.cmp(&b.price_per_day).then(a.id.cmp(&b.id)));
        Ok(cars)
    }

    async fn create(&self, car: NewCar) -> AppResult<Car> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let created = Car::from_new(id, car, None, Utc::now());
        tables.cars.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, car: NewCar) -> AppResult<Option<Car>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(current) = tables.cars.get_mut(&id) else {
            return Ok(None);
        };
        *current = Car::from_new(id, car, current.image_url.clone(), current.created_at);
        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.check()?;
        Ok(self.tables.write().await.cars.remove(&id).is_some())
    }

    async fn set_image_url(&self, id: i64, image_url: &str) -> AppResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.cars.get_mut(&id) {
            Some(car) => {
                car.image_url = Some(image_url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl DriverRepository for InMemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Driver>> {
        self.check()?;
        let mut drivers: Vec<Driver> = self.tables.read().await.drivers.values().cloned().collect();
        newest_first(&mut drivers, |d| (d.created_at, d.id));
        Ok(drivers)
    }

    async fn list_available(&self) -> AppResult<Vec<Driver>> {
        self.check()?;
        let mut drivers: Vec<Driver> = self
            .tables
            .read()
            .await
            .drivers
            .values()
            .filter(|d| d.status == DriverStatus::Available)
            .cloned()
            .collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(drivers)
    }

    async fn create(&self, driver: NewDriver) -> AppResult<Driver> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let created = Driver::from_new(id, driver, Utc::now());
        tables.drivers.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, mut driver: NewDriver) -> AppResult<Option<Driver>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(current) = tables.drivers.get_mut(&id) else {
            return Ok(None);
        };
        if driver.photo_url.is_none() {
            driver.photo_url = current.photo_url.clone();
        }
        *current = Driver::from_new(id, driver, current.created_at);
        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.check()?;
        Ok(self.tables.write().await.drivers.remove(&id).is_some())
    }

    async fn set_photo_url(&self, id: i64, photo_url: &str) -> AppResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.drivers.get_mut(&id) {
            Some(driver) => {
                driver.photo_url = Some(photo_url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TermRepository for InMemoryStore {
    async fn list_ordered(&self) -> AppResult<Vec<Term>> {
        self.check()?;
        let mut terms: Vec<Term> = self.tables.read().await.terms.values().cloned().collect();
        terms.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(a.id.cmp(&b.id)));
        Ok(terms)
    }

    async fn create(&self, term: NewTerm) -> AppResult<Term> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let created = Term::from_new(id, term, Utc::now());
        tables.terms.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, term: NewTerm) -> AppResult<Option<Term>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(current) = tables.terms.get_mut(&id) else {
            return Ok(None);
        };
        *current = Term::from_new(id, term, current.created_at);
        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.check()?;
        Ok(self.tables.write().await.terms.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn car(name: &str, model: &str, price: i64, available: bool) -> NewCar {
        NewCar {
            name: name.to_string(),
            model: model.to_string(),
            year: 2020,
            price_per_day: Decimal::new(price, 0),
            whatsapp_number: "250788000000".to_string(),
            images: Vec::new(),
            description: String::new(),
            location: None,
            seats: 5,
            doors: 4,
            transmission: "Automatic".to_string(),
            available,
            start_date: None,
            end_date: None,
        }
    }

    fn driver(name: &str, status: DriverStatus) -> NewDriver {
        NewDriver {
            name: name.to_string(),
            phone: String::new(),
            email: String::new(),
            license_number: String::new(),
            vehicle_assigned: String::new(),
            status,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_cars_newest_first() {
        let store = InMemoryStore::new();
        let first = CarRepository::create(&store, car("Toyota", "Corolla", 30_000, true)).await.unwrap();
        let second = CarRepository::create(&store, car("Suzuki", "Swift", 25_000, true)).await.unwrap();

        let cars = CarRepository::list_all(&store).await.unwrap();
        assert_eq!(cars.iter().map(|c| c.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts_by_price() {
        let store = InMemoryStore::new();
        CarRepository::create(&store, car("Toyota", "Land Cruiser", 120_000, true)).await.unwrap();
        CarRepository::create(&store, car("Toyota", "Corolla", 30_000, true)).await.unwrap();
        CarRepository::create(&store, car("Toyota", "Hilux", 60_000, false)).await.unwrap();
        CarRepository::create(&store, car("Suzuki", "Swift", 25_000, true)).await.unwrap();

        let found = store.search("toyota").await.unwrap();
        let models: Vec<_> = found.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Corolla", "Land Cruiser"]);
    }

    #[tokio::test]
    async fn test_update_keeps_uploaded_image() {
        let store = InMemoryStore::new();
        let created = CarRepository::create(&store, car("Toyota", "Corolla", 30_000, true)).await.unwrap();
        assert!(store.set_image_url(created.id, "/uploads/cars/a.jpg").await.unwrap());

        let updated = CarRepository::update(&store, created.id, car("Toyota", "Corolla", 35_000, false))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.image_url.as_deref(), Some("/uploads/cars/a.jpg"));
        assert_eq!(updated.price_per_day, Decimal::new(35_000, 0));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let store = InMemoryStore::new();
        assert!(CarRepository::update(&store, 99, car("a", "b", 1, true)).await.unwrap().is_none());
        assert!(!CarRepository::delete(&store, 99).await.unwrap());
        assert!(!store.set_photo_url(99, "/x.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_available_drivers_by_name() {
        let store = InMemoryStore::new();
        DriverRepository::create(&store, driver("Marie", DriverStatus::Available)).await.unwrap();
        DriverRepository::create(&store, driver("Bob", DriverStatus::Busy)).await.unwrap();
        DriverRepository::create(&store, driver("Alice", DriverStatus::Available)).await.unwrap();

        let names: Vec<_> = store
            .list_available()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Marie"]);
    }

    #[tokio::test]
    async fn test_terms_by_display_order() {
        let store = InMemoryStore::new();
        for (title, order) in [("Fuel", 2), ("Deposit", 1), ("Insurance", 1)] {
            TermRepository::create(
                &store,
                NewTerm {
                    title: title.to_string(),
                    content: "...".to_string(),
                    display_order: order,
                },
            )
            .await
            .unwrap();
        }
        let titles: Vec<_> = store
            .list_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Deposit", "Insurance", "Fuel"]);
    }

    #[tokio::test]
    async fn test_disconnected_store_fails() {
        let store = InMemoryStore::new();
        store.set_connected(false);
        assert!(!store.is_connected().await);
        assert!(matches!(
            CarRepository::list_all(&store).await,
            Err(AppError::Database(_))
        ));
    }
}
