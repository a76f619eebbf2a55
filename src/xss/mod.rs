// XSS detection: reflection heuristics and source consistency

pub mod consistency;
pub mod reflect;
