use std::fmt::{self, Write};

use baraza_client::{
    api::{self, Forum, Report},
    ForumView,
};

const INDENT: &str = "    ";

pub fn forum_list(forums: &[Forum]) -> Result<String, fmt::Error> {
    let mut res = String::new();
    for f in forums {
        let report = if f.has_report { "  [report available]" } else { "" };
        writeln!(res, "{:>3}  {}{}", f.id.0, f.title, report)?;
        writeln!(res, "     {}", f.description)?;
        writeln!(
            res,
            "     {} participants, {} opinions, {} votes",
            f.participants, f.opinions, f.votes
        )?;
    }
    Ok(res)
}

pub fn forum_view(view: &ForumView) -> Result<String, fmt::Error> {
    let mut res = String::new();
    writeln!(res, "{}", view.forum.title)?;
    writeln!(res, "{}", view.forum.description)?;
    if view.can_view_report() {
        writeln!(res, "Report available, see `report {}`", view.forum.id)?;
    }
    writeln!(res)?;
    for (o, depth) in view.opinions() {
        let indent = INDENT.repeat(depth);
        writeln!(
            res,
            "{indent}{} {} at {}  (+{} -{})",
            o.id,
            o.author,
            api::display_time(&o.timestamp),
            o.upvotes,
            o.downvotes,
        )?;
        for line in o.content.lines() {
            writeln!(res, "{indent}  {line}")?;
        }
    }
    if !view.can_post() {
        writeln!(res, "\n(read-only view)")?;
    }
    Ok(res)
}

pub fn report(r: &Report) -> Result<String, fmt::Error> {
    let mut res = String::new();
    writeln!(res, "{}\n", r.title)?;
    writeln!(res, "Summary\n  {}\n", r.summary)?;
    writeln!(res, "Key themes")?;
    for t in &r.key_themes {
        writeln!(res, "  - {t}")?;
    }
    writeln!(res, "\nSentiment\n  {}", r.sentiment)?;
    Ok(res)
}
