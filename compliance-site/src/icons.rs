/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Content-layer icon keys.
//!
//! Rows in the content store name their icon with a string such as
//! `"Shield"`. The set of valid keys is closed: [`Icon::ALL`] lists every
//! one, and [`resolve_icon`] maps anything else to [`Icon::DEFAULT`].

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Shield,
    ShieldCheck,
    Lock,
    Key,
    FileText,
    FileCheck,
    CheckCircle,
    AlertTriangle,
    BarChart,
    TrendingUp,
    Users,
    Globe,
    Server,
    Database,
    Cloud,
    BookOpen,
    Video,
    Download,
    Award,
    Zap,
    Eye,
    Clock,
    Target,
}

impl Icon {
    /// Shown for unknown or missing icon keys.
    pub const DEFAULT: Icon = Icon::FileText;

    pub const ALL: [Icon; 23] = [
        Icon::Shield,
        Icon::ShieldCheck,
        Icon::Lock,
        Icon::Key,
        Icon::FileText,
        Icon::FileCheck,
        Icon::CheckCircle,
        Icon::AlertTriangle,
        Icon::BarChart,
        Icon::TrendingUp,
        Icon::Users,
        Icon::Globe,
        Icon::Server,
        Icon::Database,
        Icon::Cloud,
        Icon::BookOpen,
        Icon::Video,
        Icon::Download,
        Icon::Award,
        Icon::Zap,
        Icon::Eye,
        Icon::Clock,
        Icon::Target,
    ];

    /// The key used in content rows.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Shield => "Shield",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::Lock => "Lock",
            Icon::Key => "Key",
            Icon::FileText => "FileText",
            Icon::FileCheck => "FileCheck",
            Icon::CheckCircle => "CheckCircle",
            Icon::AlertTriangle => "AlertTriangle",
            Icon::BarChart => "BarChart",
            Icon::TrendingUp => "TrendingUp",
            Icon::Users => "Users",
            Icon::Globe => "Globe",
            Icon::Server => "Server",
            Icon::Database => "Database",
            Icon::Cloud => "Cloud",
            Icon::BookOpen => "BookOpen",
            Icon::Video => "Video",
            Icon::Download => "Download",
            Icon::Award => "Award",
            Icon::Zap => "Zap",
            Icon::Eye => "Eye",
            Icon::Clock => "Clock",
            Icon::Target => "Target",
        }
    }

    /// Sprite class of the rendered symbol.
    pub fn css_class(self) -> &'static str {
        match self {
            Icon::Shield => "icon-shield",
            Icon::ShieldCheck => "icon-shield-check",
            Icon::Lock => "icon-lock",
            Icon::Key => "icon-key",
            Icon::FileText => "icon-file-text",
            Icon::FileCheck => "icon-file-check",
            Icon::CheckCircle => "icon-check-circle",
            Icon::AlertTriangle => "icon-alert-triangle",
            Icon::BarChart => "icon-bar-chart",
            Icon::TrendingUp => "icon-trending-up",
            Icon::Users => "icon-users",
            Icon::Globe => "icon-globe",
            Icon::Server => "icon-server",
            Icon::Database => "icon-database",
            Icon::Cloud => "icon-cloud",
            Icon::BookOpen => "icon-book-open",
            Icon::Video => "icon-video",
            Icon::Download => "icon-download",
            Icon::Award => "icon-award",
            Icon::Zap => "icon-zap",
            Icon::Eye => "icon-eye",
            Icon::Clock => "icon-clock",
            Icon::Target => "icon-target",
        }
    }

    /// Exact-key lookup; `None` for unknown keys.
    pub fn from_name(name: &str) -> Option<Icon> {
        Icon::ALL.into_iter().find(|icon| icon.name() == name)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a content-layer key to its icon, or [`Icon::DEFAULT`]. Never fails.
pub fn resolve_icon(name: &str) -> Icon {
    Icon::from_name(name.trim()).unwrap_or(Icon::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_names_resolve_to_their_icon() {
        assert_eq!(resolve_icon("Shield"), Icon::Shield);
        assert_eq!(resolve_icon("BookOpen"), Icon::BookOpen);
        assert_eq!(resolve_icon(" Lock "), Icon::Lock);
    }

    #[test]
    fn unknown_names_resolve_to_default() {
        assert_eq!(resolve_icon("NonexistentName"), Icon::DEFAULT);
        assert_eq!(resolve_icon(""), Icon::DEFAULT);
        assert_eq!(resolve_icon("shield"), Icon::DEFAULT);
    }

    #[test]
    fn every_icon_round_trips_through_its_name() {
        for icon in Icon::ALL {
            assert_eq!(resolve_icon(icon.name()), icon);
        }
    }

    #[test]
    fn names_and_classes_are_unique() {
        let names: HashSet<_> = Icon::ALL.iter().map(|i| i.name()).collect();
        let classes: HashSet<_> = Icon::ALL.iter().map(|i| i.css_class()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
        assert_eq!(classes.len(), Icon::ALL.len());
    }

    #[test]
    fn default_matches_content_row_default() {
        assert_eq!(
            Icon::DEFAULT.name(),
            compliance_content_types::content::DEFAULT_ICON_NAME
        );
    }
}
