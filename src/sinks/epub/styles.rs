//! The book's stylesheet.
//!
//! One fixed stylesheet is shared by every document. It only sets body and
//! heading sizing plus the handful of classes the generated pages use, and
//! leaves everything else to the reader's defaults.

pub const STYLESHEET: &str = r#"/* Base styles */
body {
    font-size: 1em;
    line-height: 1.5;
    margin: 0 1em;
}

h1 {
    font-size: 1.8em;
    text-align: center;
    margin: 1em 0;
}

h2 {
    font-size: 1.5em;
    margin: 1em 0 0.5em;
}

h3 {
    font-size: 1.3em;
    margin: 1em 0 0.5em;
}

h4, h5, h6 {
    font-size: 1.1em;
    margin: 1em 0 0.5em;
}

p {
    font-size: 1em;
    margin: 0.5em 0;
}

img {
    max-width: 100%;
}

/* Cover page */
.cover {
    text-align: center;
    margin: 0;
    padding: 0;
}

/* Title page */
.title-page table {
    margin: 2em auto;
    border-collapse: collapse;
}

.title-page th {
    text-align: right;
    padding: 0.3em 1em;
    font-weight: bold;
}

.title-page td {
    text-align: left;
    padding: 0.3em 1em;
}

/* Table of contents */
.toc ol {
    list-style-type: none;
    padding-left: 1em;
}

.toc li {
    margin: 0.3em 0;
}

.toc a {
    text-decoration: none;
    color: inherit;
}
"#;
