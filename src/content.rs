//! Static site content: project showcase and blog posts.
//!
//! Embedded in the binary; there is no content store.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectLink {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub href: &'static str,
    pub dates: &'static str,
    pub active: bool,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub links: &'static [ProjectLink],
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub category: &'static str,
    pub read_time: &'static str,
    pub thumbnail: &'static str,
    /// HTML fragment.
    pub content: &'static str,
}

/// Listing view of a post, without the body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlogSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub category: &'static str,
    pub read_time: &'static str,
    pub thumbnail: &'static str,
}

impl From<&BlogPost> for BlogSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            date: post.date,
            category: post.category,
            read_time: post.read_time,
            thumbnail: post.thumbnail,
        }
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Crypton - Real Time Crypto Tracking App",
        href: "https://crypton-wheat.vercel.app/",
        dates: "September'25",
        active: true,
        description: "Cryptocurrency dashboard for tracking real-time prices, comparing coins, setting alerts, \
                      managing watchlists, and viewing analytics with interactive charts.",
        technologies: &["React.js", "TypeScript", "Tailwind CSS", "Coingecko API", "AI"],
        links: &[ProjectLink { kind: "Website", href: "https://crypton-wheat.vercel.app/" }],
        image: "/projects/crypton.png",
    },
    Project {
        title: "3D Portfolio",
        href: "#",
        dates: "2025",
        active: true,
        description: "This site: a portfolio with a project carousel, blog, contact form, and a small chat bot.",
        technologies: &["Next.js", "React", "Tailwind CSS", "Framer Motion"],
        links: &[],
        image: "/projects/portfolio.png",
    },
];

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "journey-into-tech",
        title: "my first-ever hackathon!🚀",
        excerpt: "How I started coding and where I'm heading next...",
        date: "Sept 2025",
        category: "Career",
        read_time: "5 min read",
        thumbnail: "/blog/hackathonexp.jpg",
        content: "<p>My first hackathon: 36 hours, one team, and a working prototype of Crypton, a \
                  cryptocurrency dashboard.</p>\
                  <h2>What I Learned</h2>\
                  <ul><li><strong>Teamwork is everything.</strong></li>\
                  <li><strong>Perfection isn't the goal.</strong> A working MVP beats flawless code.</li>\
                  <li><strong>Hackathons are about growth.</strong></li></ul>",
    },
    BlogPost {
        slug: "portfolio-design",
        title: "Building My Portfolio from Scratch 🎨",
        excerpt: "A look behind the scenes of my portfolio design process.",
        date: "Sept 2025",
        category: "Design",
        read_time: "7 min read",
        thumbnail: "/api/placeholder/400/200",
        content: "<p>Designing and building my portfolio was a journey of self-reflection and technical growth.</p>\
                  <h2>Design Inspiration</h2>\
                  <p>Minimalist design principles combined with subtle animations.</p>\
                  <h2>Technical Stack</h2>\
                  <p>Next.js for performance and SEO, Tailwind CSS for rapid styling.</p>",
    },
    BlogPost {
        slug: "gssoc-notes",
        title: "Notes from GSSoC 💻",
        excerpt: "Lessons I learned contributing to open source...",
        date: "Aug 2025",
        category: "Open Source",
        read_time: "6 min read",
        thumbnail: "/api/placeholder/400/200",
        content: "<p>GirlScript Summer of Code introduced me to open-source contribution.</p>\
                  <h2>Getting Started</h2>\
                  <p>The first pull request is always the hardest.</p>\
                  <h2>Key Learnings</h2>\
                  <p>Version control practices, code reviews, and clear documentation.</p>",
    },
];

#[must_use]
pub fn blog_summaries() -> Vec<BlogSummary> {
    BLOG_POSTS.iter().map(BlogSummary::from).collect()
}

#[must_use]
pub fn find_post(slug: &str) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|post| post.slug == slug)
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
