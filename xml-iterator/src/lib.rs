use std::borrow::Cow;

fn split_at_str<'a>(input: &'a str, needle: &str) -> Option<(&'a str, &'a str)> {
    let end = input.find(needle)?;
    let (head, tail) = input.split_at(end);
    Some((head, &tail[needle.len()..]))
}

/// splits at the first whitespace char; the whitespace itself is dropped.
fn split_at_whitespace(input: &str) -> (&str, &str) {
    match input.find(|c: char| c.is_ascii_whitespace()) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

/// finds `>` that closes the tag that `input` starts with. `>` inside of quoted attribute values
/// does not count.
fn find_tag_end(input: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in input.bytes().enumerate() {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), _) if q == b => quote = None,
            (None, b'>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn strip_decl(input: &str) -> Option<&str> {
    if !input.trim_start().starts_with("<?xml") {
        return None;
    }
    split_at_str(input, "?>").map(|(_, tail)| tail.trim_start())
}

#[test]
fn test_strip_decl() {
    const WITH_DECL: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<registry>
"#;
    assert!(strip_decl(WITH_DECL).unwrap().starts_with("<registry>"));

    const WITHOUT_DECL: &str = r#"
<registry>
"#;
    assert_eq!(strip_decl(WITHOUT_DECL), None);
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

/// replaces predefined and numeric character references. unknown or malformed references are
/// kept as is.
pub fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some((head, tail)) = split_at_str(rest, "&") {
        output.push_str(head);
        match split_at_str(tail, ";").and_then(|(entity, after)| Some((decode_entity(entity)?, after)))
        {
            Some((c, after)) => {
                output.push(c);
                rest = after;
            }
            None => {
                output.push('&');
                rest = tail;
            }
        }
    }
    output.push_str(rest);
    Cow::Owned(output)
}

#[test]
fn test_unescape() {
    assert!(matches!(unescape("pAllocateInfo"), Cow::Borrowed("pAllocateInfo")));
    assert_eq!(
        unescape("pAllocateInfo-&gt;descriptorSetCount"),
        "pAllocateInfo->descriptorSetCount"
    );
    assert_eq!(unescape("&lt;&amp;&quot;&apos;&#65;&#x42;"), "<&\"'AB");
    assert_eq!(unescape("a & b &unknown; c&"), "a & b &unknown; c&");
}

#[derive(Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    /// raw value, as it appears in the document. see [`Attribute::unescaped_value`].
    pub value: &'a str,
}

impl<'a> Attribute<'a> {
    pub fn unescaped_value(&self) -> Cow<'a, str> {
        unescape(self.value)
    }
}

pub struct AttributeIterator<'a> {
    attrs: &'a str,
}

impl<'a> AttributeIterator<'a> {
    pub fn new(attrs: &'a str) -> Self {
        Self { attrs }
    }
}

impl<'a> Iterator for AttributeIterator<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, rest) = split_at_str(self.attrs, "=")?;
        let rest = rest.trim_start();
        let quote = match rest.chars().next()? {
            q @ ('"' | '\'') => q,
            // NOTE: unquoted values are not valid xml. stop here instead of guessing where the
            // value ends.
            _ => return None,
        };
        let (value, rest) = split_at_str(&rest[1..], quote.encode_utf8(&mut [0; 4]))?;
        self.attrs = rest.trim_start();
        Some(Attribute {
            key: key.trim(),
            value,
        })
    }
}

#[test]
fn test_attribute_iterator() {
    const ATTRS: &str = r#"name="vkCreateImage" alias = 'vkCreateImageKHR'
        len="pCreateInfo-&gt;count""#;
    let mut iterator = AttributeIterator::new(ATTRS);
    assert_eq!(
        iterator.next(),
        Some(Attribute {
            key: "name",
            value: "vkCreateImage"
        })
    );
    assert_eq!(
        iterator.next(),
        Some(Attribute {
            key: "alias",
            value: "vkCreateImageKHR"
        })
    );
    let len = iterator.next().unwrap();
    assert_eq!(len.key, "len");
    assert_eq!(len.unescaped_value(), "pCreateInfo->count");
    assert_eq!(iterator.next(), None);
}

#[derive(Debug, PartialEq, Eq)]
pub struct EmptyTag<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
}

impl<'a> EmptyTag<'a> {
    pub fn iter_attrs(&self) -> AttributeIterator<'a> {
        AttributeIterator::new(self.attrs)
    }

    pub fn attr(&self, key: &str) -> Option<Cow<'a, str>> {
        self.iter_attrs()
            .find(|attr| attr.key == key)
            .map(|attr| attr.unescaped_value())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct StartTag<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
}

impl<'a> StartTag<'a> {
    pub fn iter_attrs(&self) -> AttributeIterator<'a> {
        AttributeIterator::new(self.attrs)
    }

    pub fn attr(&self, key: &str) -> Option<Cow<'a, str>> {
        self.iter_attrs()
            .find(|attr| attr.key == key)
            .map(|attr| attr.unescaped_value())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EndTag<'a> {
    pub name: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Element<'a> {
    EmptyTag(EmptyTag<'a>),
    StartTag(StartTag<'a>),
    EndTag(EndTag<'a>),
    /// raw text; use [`unescape`] to resolve character references.
    Text(&'a str),
    Comment(&'a str),
    /// `<?...?>` or `<!...>` that is not a comment.
    Instruction(&'a str),
}

impl<'a> Element<'a> {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Text(text) if text.chars().all(|c| c.is_whitespace()))
    }
}

pub struct ElementIterator<'a> {
    input: &'a str,
}

impl<'a> ElementIterator<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: strip_decl(input).unwrap_or(input),
        }
    }

    fn next_tag(&mut self) -> Option<Element<'a>> {
        assert!(self.input.starts_with('<'));

        let end = find_tag_end(self.input)?;
        let content = &self.input[1..end];
        self.input = &self.input[end + 1..];

        if let Some(name) = content.strip_prefix('/') {
            return Some(Element::EndTag(EndTag { name: name.trim() }));
        }
        if let Some(content) = content.strip_suffix('/') {
            let (name, attrs) = split_at_whitespace(content.trim_end());
            return Some(Element::EmptyTag(EmptyTag { name, attrs }));
        }
        let (name, attrs) = split_at_whitespace(content.trim_end());
        Some(Element::StartTag(StartTag { name, attrs }))
    }

    fn next_instruction(&mut self) -> Option<Element<'a>> {
        let close = if self.input.starts_with("<?") {
            "?>"
        } else {
            ">"
        };
        let (content, rest) = split_at_str(&self.input[2..], close)?;
        self.input = rest;
        Some(Element::Instruction(content))
    }

    fn next_text(&mut self) -> Option<Element<'a>> {
        assert!(!self.input.starts_with('<'));
        assert!(!self.input.is_empty());

        let end = self.input.find('<').unwrap_or(self.input.len());
        let (content, rest) = self.input.split_at(end);
        self.input = rest;
        Some(Element::Text(content))
    }

    fn next_comment(&mut self) -> Option<Element<'a>> {
        assert!(self.input.starts_with("<!--"));

        let (content, rest) = split_at_str(&self.input[4..], "-->")?;
        self.input = rest;
        Some(Element::Comment(content))
    }
}

#[test]
fn test_next_tag_empty() {
    const INPUT: &str = r#"<command name="vkCreateImageKHR" alias="vkCreateImage"/>"#;
    assert_eq!(
        ElementIterator::new(INPUT).next_tag(),
        Some(Element::EmptyTag(EmptyTag {
            name: "command",
            attrs: r#"name="vkCreateImageKHR" alias="vkCreateImage""#
        }))
    );
    assert_eq!(
        ElementIterator::new("<require/>").next_tag(),
        Some(Element::EmptyTag(EmptyTag {
            name: "require",
            attrs: ""
        }))
    );
}

#[test]
fn test_next_tag_end() {
    assert_eq!(
        ElementIterator::new("</registry>").next_tag(),
        Some(Element::EndTag(EndTag { name: "registry" }))
    );
}

#[test]
fn test_next_tag_start() {
    const INPUT: &str = "<param\n\toptional=\"false,true\" len=\"a-&gt;b\">";
    assert_eq!(
        ElementIterator::new(INPUT).next_tag(),
        Some(Element::StartTag(StartTag {
            name: "param",
            attrs: r#"optional="false,true" len="a-&gt;b""#
        }))
    );
}

#[test]
fn test_next_tag_quoted_gt() {
    const INPUT: &str = r#"<param len="a->b">rest"#;
    let mut iterator = ElementIterator::new(INPUT);
    let Some(Element::StartTag(start)) = iterator.next_tag() else {
        panic!("expected start tag");
    };
    assert_eq!(start.attr("len").as_deref(), Some("a->b"));
    assert_eq!(iterator.next(), Some(Element::Text("rest")));
}

#[test]
fn test_next_text() {
    const INPUT: &str = "const <type>char</type>";
    assert_eq!(
        ElementIterator::new(INPUT).next_text(),
        Some(Element::Text("const "))
    );
}

#[test]
fn test_next_comment() {
    const INPUT: &str = "<!-- SECTION: Vulkan command definitions -->";
    assert_eq!(
        ElementIterator::new(INPUT).next_comment(),
        Some(Element::Comment(" SECTION: Vulkan command definitions ")),
    );
}

impl<'a> Iterator for ElementIterator<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.input.is_empty() {
            None
        } else if self.input.starts_with("<!--") {
            self.next_comment()
        } else if self.input.starts_with("<?") || self.input.starts_with("<!") {
            self.next_instruction()
        } else if self.input.starts_with('<') {
            self.next_tag()
        } else {
            self.next_text()
        }
    }
}

#[test]
fn test_element_iterator_param() {
    const INPUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<param optional="true">const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>"#;
    let elements: Vec<Element> = ElementIterator::new(INPUT).collect();
    assert_eq!(
        elements,
        vec![
            Element::StartTag(StartTag {
                name: "param",
                attrs: r#"optional="true""#
            }),
            Element::Text("const "),
            Element::StartTag(StartTag {
                name: "type",
                attrs: ""
            }),
            Element::Text("VkAllocationCallbacks"),
            Element::EndTag(EndTag { name: "type" }),
            Element::Text("* "),
            Element::StartTag(StartTag {
                name: "name",
                attrs: ""
            }),
            Element::Text("pAllocator"),
            Element::EndTag(EndTag { name: "name" }),
            Element::EndTag(EndTag { name: "param" }),
        ]
    );
}

#[test]
fn test_element_iterator_instruction() {
    const INPUT: &str = "<!DOCTYPE registry><registry/>";
    let mut iterator = ElementIterator::new(INPUT);
    assert_eq!(iterator.next(), Some(Element::Instruction("DOCTYPE registry")));
    assert!(matches!(iterator.next(), Some(Element::EmptyTag(_))));
    assert_eq!(iterator.next(), None);
}
