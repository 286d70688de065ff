use std::{
    collections::{btree_map, BTreeMap},
    path::Path,
    time::Duration,
};

use anyhow::Context;
use baraza_client::{
    api::{self, Error, Forum, ForumFixture, ForumId, Report},
    Catalog, ForumView, Role, ViewConfig,
};

pub mod fixtures;

pub const DEFAULT_REPORT_DELAY: Duration = Duration::from_secs(2);

pub struct MockServer {
    catalog: Catalog,
    forums: BTreeMap<ForumId, DbForum>,
    report_delay: Duration,
}

#[derive(Debug)]
struct DbForum {
    opinions: Vec<api::Opinion>,
    report: Option<Report>,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            catalog: Catalog::new(),
            forums: BTreeMap::new(),
            report_delay: DEFAULT_REPORT_DELAY,
        }
    }

    /// A server holding the forums every fresh install shows
    pub fn with_fixtures() -> MockServer {
        MockServer::from_fixtures(fixtures::forums())
            .expect("built-in fixtures are consistent")
    }

    pub fn from_fixtures(fixtures: Vec<ForumFixture>) -> Result<MockServer, Error> {
        let mut res = MockServer::new();
        for f in fixtures {
            res.admin_create_forum(f)?;
        }
        Ok(res)
    }

    /// Load fixtures from a JSON file holding a list of forums
    pub fn load_fixtures(path: &Path) -> anyhow::Result<MockServer> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture file {path:?}"))?;
        let fixtures: Vec<ForumFixture> = serde_json::from_str(&data)
            .with_context(|| format!("parsing fixture file {path:?}"))?;
        let res = MockServer::from_fixtures(fixtures)
            .with_context(|| format!("validating fixture file {path:?}"))?;
        tracing::info!(num_forums = res.forums.len(), ?path, "loaded fixtures");
        Ok(res)
    }

    pub fn with_report_delay(mut self, delay: Duration) -> MockServer {
        self.report_delay = delay;
        self
    }

    pub fn admin_create_forum(&mut self, f: ForumFixture) -> Result<(), Error> {
        f.validate()?;
        // also checks opinion id uniqueness
        baraza_client::Thread::from_forest(f.opinions.clone())?;

        match self.forums.entry(f.forum.id) {
            btree_map::Entry::Occupied(_) => Err(Error::ForumIdAlreadyUsed(f.forum.id)),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(DbForum {
                    opinions: f.opinions,
                    report: f.report,
                });
                self.catalog.add_forums(vec![f.forum]);
                Ok(())
            }
        }
    }

    fn resolve(&self, id: ForumId) -> Result<(&Forum, &DbForum), Error> {
        match (self.catalog.forum(&id), self.forums.get(&id)) {
            (Some(forum), Some(f)) => Ok((forum, f)),
            _ => Err(Error::UnknownForum(id)),
        }
    }

    /// A snapshot of the forum list, that later changes do not affect
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    /// Forums whose title matches `query`, see [`Catalog::search`]
    pub fn fetch_forums(&self, query: &str) -> Vec<Forum> {
        self.catalog.search(query).into_iter().cloned().collect()
    }

    /// The forum with exactly this title, if any
    pub fn find_forum(&self, title: &str) -> Option<ForumId> {
        self.catalog.forum_id(title)
    }

    /// Open a view on a forum. Whatever gets posted in the view stays there.
    pub fn open_forum(&self, id: ForumId, config: ViewConfig) -> Result<ForumView, Error> {
        let (forum, f) = self.resolve(id)?;
        ForumView::new(forum.clone(), f.opinions.clone(), f.report.clone(), config)
    }

    pub fn fetch_report(&self, id: ForumId) -> Result<Report, Error> {
        let (forum, f) = self.resolve(id)?;
        match (&f.report, forum.has_report) {
            (Some(r), true) => Ok(r.clone()),
            _ => Err(Error::ReportUnavailable(id)),
        }
    }

    /// Simulates a slow analysis of the forum, then makes the report available
    pub async fn generate_report(&mut self, role: Role, id: ForumId) -> Result<Report, Error> {
        if role != Role::Admin {
            return Err(Error::PermissionDenied);
        }
        let report = fixtures::canned_report(self.resolve(id)?.0);
        tracing::info!(forum = %id, delay = ?self.report_delay, "generating report");
        tokio::time::sleep(self.report_delay).await;

        self.forums
            .get_mut(&id)
            .ok_or(Error::UnknownForum(id))?
            .report = Some(report.clone());
        if !self.catalog.mark_report_ready(&id) {
            return Err(Error::UnknownForum(id));
        }
        tracing::info!(forum = %id, "report generated");
        Ok(report)
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}
