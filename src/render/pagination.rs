use std::fmt;

use colored::Colorize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageLink {
    Previous { target: Option<usize> },
    Number { page: usize, active: bool },
    Next { target: Option<usize> },
}

impl PageLink {
    /// The page this link leads to, or `None` when it is disabled.
    pub fn target(&self) -> Option<usize> {
        match self {
            PageLink::Previous { target } | PageLink::Next { target } => *target,
            PageLink::Number { page, .. } => Some(*page),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.target().is_none()
    }

    pub fn label(&self) -> String {
        match self {
            PageLink::Previous { .. } => "«".to_string(),
            PageLink::Number { page, .. } => page.to_string(),
            PageLink::Next { .. } => "»".to_string(),
        }
    }

    pub fn aria_label(&self) -> String {
        match self {
            PageLink::Previous { .. } => "Previous".to_string(),
            PageLink::Number { page, .. } => format!("Page {page}"),
            PageLink::Next { .. } => "Next".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: usize,
    pub page_count: usize,
    pub links: Vec<PageLink>,
}

/// Builds previous / numbered / next links. A single page needs no controls.
pub fn controls(current: usize, page_count: usize) -> Option<PaginationControls> {
    if page_count <= 1 {
        return None;
    }
    let current = current.clamp(1, page_count);
    let mut links = Vec::with_capacity(page_count + 2);
    links.push(PageLink::Previous {
        target: (current > 1).then(|| current - 1),
    });
    for page in 1..=page_count {
        links.push(PageLink::Number {
            page,
            active: page == current,
        });
    }
    links.push(PageLink::Next {
        target: (current < page_count).then(|| current + 1),
    });
    Some(PaginationControls {
        current,
        page_count,
        links,
    })
}

impl fmt::Display for PaginationControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for link in &self.links {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            let label = link.label();
            match link {
                PageLink::Number { active: true, .. } => {
                    write!(f, "{}", format!("[{label}]").bold().reversed())?
                }
                _ if link.is_disabled() => write!(f, "{}", label.dimmed())?,
                _ => write!(f, "{label}")?,
            }
        }
        write!(f, "   page {} of {}", self.current, self.page_count)
    }
}
