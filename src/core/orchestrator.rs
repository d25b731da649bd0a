use crate::core::{Film, Output, Person, Planet, SwapiApi};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub fn render_person(person: &Person) -> String {
    format!(
        "Name: {}\nBirth Year: {}\nGender: {}\nHeight {}cm & Mass: {}kg\n",
        person.name, person.birth_year, person.gender, person.height, person.mass
    )
}

pub fn render_planet(planet: &Planet) -> String {
    format!("Home Planet: {} \n\n", planet.name)
}

pub fn render_film(film: &Film) -> String {
    format!(
        "Title: {}\nRelease Date: {}\nOpening Crawl:\n{}\n\n",
        film.title, film.release_date, film.opening_crawl
    )
}

/// What a run did. Absent entities only show up in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub person: Option<Person>,
    pub planet_printed: bool,
    pub films_requested: usize,
    pub films_printed: usize,
    pub failures: usize,
}

enum Completed {
    Planet(bool),
    Film(bool),
}

/// Fetches one person, then fans out to the homeworld and every film.
pub struct Orchestrator<A: SwapiApi + 'static, O: Output + 'static> {
    api: Arc<A>,
    output: Arc<O>,
    limiter: Option<Arc<Semaphore>>,
}

impl<A: SwapiApi + 'static, O: Output + 'static> Orchestrator<A, O> {
    pub fn new(api: Arc<A>, output: Arc<O>) -> Self {
        Self {
            api,
            output,
            limiter: None,
        }
    }

    /// `None` (the default) leaves the fan-out unbounded.
    pub fn with_max_concurrent(mut self, max_concurrent: Option<usize>) -> Self {
        self.limiter = max_concurrent
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub async fn run(&self, person_id: u32) -> RunReport {
        let mut report = RunReport::default();

        let person = match self.api.fetch_person(person_id).await {
            Ok(person) => person,
            Err(e) => {
                tracing::debug!("Person {} unavailable: {}", person_id, e);
                report.failures += 1;
                return report;
            }
        };
        self.output.write_section(&render_person(&person));

        // 一個 planet + 每部影片各一個 task，全部同時送出
        let mut tasks = JoinSet::new();
        tasks.spawn(self.planet_task(person.homeworld.to_string()));
        for film in &person.films {
            tasks.spawn(self.film_task(film.to_string()));
        }
        report.films_requested = person.films.len();
        tracing::debug!(
            "Spawned {} fetches for {}",
            report.films_requested + 1,
            person.name
        );

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Completed::Planet(true)) => report.planet_printed = true,
                Ok(Completed::Film(true)) => report.films_printed += 1,
                Ok(_) => report.failures += 1,
                Err(e) => {
                    tracing::error!("Fetch task aborted: {}", e);
                    report.failures += 1;
                }
            }
        }

        report.person = Some(person);
        report
    }

    fn planet_task(&self, url: String) -> impl std::future::Future<Output = Completed> + Send + 'static {
        let api = Arc::clone(&self.api);
        let output = Arc::clone(&self.output);
        let limiter = self.limiter.clone();
        async move {
            let _permit = match &limiter {
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            match api.fetch_planet(&url).await {
                Ok(planet) => {
                    output.write_section(&render_planet(&planet));
                    Completed::Planet(true)
                }
                Err(_) => Completed::Planet(false),
            }
        }
    }

    fn film_task(&self, url: String) -> impl std::future::Future<Output = Completed> + Send + 'static {
        let api = Arc::clone(&self.api);
        let output = Arc::clone(&self.output);
        let limiter = self.limiter.clone();
        async move {
            let _permit = match &limiter {
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            match api.fetch_film(&url).await {
                Ok(film) => {
                    output.write_section(&render_film(&film));
                    Completed::Film(true)
                }
                Err(_) => Completed::Film(false),
            }
        }
    }
}
