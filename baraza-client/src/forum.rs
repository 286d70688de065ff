use crate::{
    api::{self, Error, Forum, OpinionId, Report, Time},
    Opinion, Thread, Traverse,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Citizen,
    Admin,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewConfig {
    pub role: Role,

    /// Name shown on everything posted from this view
    pub author: String,

    /// if false, reports are never offered, even when the forum has one
    pub reporting_enabled: bool,
}

impl ViewConfig {
    pub fn citizen() -> ViewConfig {
        ViewConfig {
            role: Role::Citizen,
            author: String::from(api::LOCAL_AUTHOR),
            reporting_enabled: true,
        }
    }

    pub fn admin() -> ViewConfig {
        ViewConfig {
            role: Role::Admin,
            author: String::from(api::LOCAL_AUTHOR),
            reporting_enabled: true,
        }
    }
}

/// One open forum page. The discussion is seeded when the view is created and
/// dropped along with it.
#[derive(Clone, Debug)]
pub struct ForumView {
    pub forum: Forum,
    pub config: ViewConfig,
    thread: Thread,
    report: Option<Report>,
}

impl ForumView {
    pub fn new(
        forum: Forum,
        opinions: Vec<api::Opinion>,
        report: Option<Report>,
        config: ViewConfig,
    ) -> Result<ForumView, Error> {
        api::validate_string(&config.author)?;
        let thread = Thread::from_forest(opinions)?;
        tracing::debug!(forum = %forum.id, num_opinions = thread.len(), "opened forum view");
        Ok(ForumView {
            forum,
            config,
            thread,
            report,
        })
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// Everything to render, in display order
    pub fn opinions(&self) -> Traverse<'_> {
        self.thread.traverse()
    }

    /// Administrators only read discussions
    pub fn can_post(&self) -> bool {
        self.config.role == Role::Citizen
    }

    pub fn can_reply(&self) -> bool {
        self.can_post()
    }

    pub fn can_view_report(&self) -> bool {
        self.config.reporting_enabled && self.forum.has_report && self.report.is_some()
    }

    pub fn report(&self) -> Result<&Report, Error> {
        match &self.report {
            Some(r) if self.can_view_report() => Ok(r),
            _ => Err(Error::ReportUnavailable(self.forum.id)),
        }
    }

    pub fn submit_opinion(&mut self, content: &str, now: Time) -> Result<&Opinion, Error> {
        if !self.can_post() {
            return Err(Error::PermissionDenied);
        }
        let o = self
            .thread
            .create_top_level(&self.config.author, content, now)?;
        tracing::debug!(forum = %self.forum.id, opinion = %o.id, "posted opinion");
        Ok(o)
    }

    pub fn submit_reply(
        &mut self,
        parent: OpinionId,
        content: &str,
        now: Time,
    ) -> Result<&Opinion, Error> {
        if !self.can_reply() {
            return Err(Error::PermissionDenied);
        }
        let o = self
            .thread
            .create_reply(parent, &self.config.author, content, now)?;
        tracing::debug!(forum = %self.forum.id, opinion = %o.id, %parent, "posted reply");
        Ok(o)
    }
}
