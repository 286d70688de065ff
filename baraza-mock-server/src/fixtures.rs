use baraza_client::api::{Forum, ForumFixture, ForumId, Opinion, OpinionId, Report, Time};
use chrono::{NaiveDateTime, TimeZone, Utc};

fn at(s: &str) -> Time {
    let t = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid fixture date");
    Utc.from_utc_datetime(&t)
}

fn opinion(
    id: u64,
    author: &str,
    content: &str,
    (upvotes, downvotes): (u64, u64),
    timestamp: &str,
    replies: Vec<Opinion>,
) -> Opinion {
    Opinion {
        id: OpinionId(id),
        author: String::from(author),
        content: String::from(content),
        upvotes,
        downvotes,
        timestamp: at(timestamp),
        replies,
    }
}

fn forum(id: u64, title: &str, description: &str, stats: [u64; 3], has_report: bool) -> Forum {
    Forum {
        id: ForumId(id),
        title: String::from(title),
        description: String::from(description),
        participants: stats[0],
        opinions: stats[1],
        votes: stats[2],
        has_report,
    }
}

/// Discussion every forum starts with
pub fn sample_opinions() -> Vec<Opinion> {
    vec![
        opinion(
            1,
            "Jane K.",
            "The provisions on accountability are crucial for our democracy. However, I believe \
             Section 7 needs clearer implementation guidelines to prevent loopholes.",
            (45, 3),
            "2024-01-10 14:30",
            vec![opinion(
                11,
                "John M.",
                "I agree. We need more specific timelines for compliance.",
                (12, 1),
                "2024-01-10 15:15",
                vec![],
            )],
        ),
        opinion(
            2,
            "David O.",
            "This bill represents a significant step forward in fiscal responsibility. The \
             penalties for non-compliance should serve as a deterrent.",
            (67, 8),
            "2024-01-09 11:20",
            vec![],
        ),
    ]
}

/// What an administrator gets back when asking for a forum report
pub fn canned_report(forum: &Forum) -> Report {
    Report {
        title: format!("Analysis of opinions and discussions on {}", forum.title),
        summary: String::from(
            "The forum discussion shows strong support for increased accountability measures. \
             Participants emphasized the importance of clear implementation guidelines and \
             strict compliance timelines.",
        ),
        key_themes: vec![
            String::from("Need for clearer implementation guidelines"),
            String::from("Support for stronger penalties for non-compliance"),
            String::from("Concerns about potential loopholes in Section 7"),
            String::from("Emphasis on fiscal responsibility and transparency"),
        ],
        sentiment: String::from(
            "Positive. Most participants view this legislation as a significant step forward, \
             though concerns remain about implementation details.",
        ),
    }
}

pub fn forums() -> Vec<ForumFixture> {
    let forums = vec![
        forum(
            1,
            "The Public Finance Management Act, 2012",
            "Discussion on transparency and accountability in public finance",
            [234, 456, 1203],
            true,
        ),
        forum(
            2,
            "The Finance Bill, 2024",
            "Analyzing proposed tax reforms and their impact on citizens",
            [567, 892, 2341],
            true,
        ),
        forum(
            3,
            "The Digital Health Bill, 2024",
            "Digital health infrastructure and data privacy concerns",
            [123, 234, 567],
            false,
        ),
        forum(
            4,
            "Constitution of Kenya - Chapter 4: Bill of Rights",
            "Understanding and protecting fundamental rights and freedoms",
            [345, 678, 1456],
            true,
        ),
    ];
    forums
        .into_iter()
        .map(|forum| ForumFixture {
            report: forum.has_report.then(|| canned_report(&forum)),
            opinions: sample_opinions(),
            forum,
        })
        .collect()
}
