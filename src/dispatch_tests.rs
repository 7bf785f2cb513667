//! End-to-end click dispatch through a loaded page

#[cfg(test)]
mod tests {
    use crate::config::DirectiveConfig;
    use crate::literal::ArgValue;
    use crate::page::Page;
    use crate::registry::ActionRegistry;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    type Calls = Rc<RefCell<Vec<(String, Vec<ArgValue>)>>>;

    const DASHBOARD: &str = r##"
        <html><body>
            <header><span id="profile-name">Ada</span></header>
            <nav>
                <a id="nav-sessions" href="#sessions" data-action="window.app.nav.show({section: 'sessions'})">Sessions</a>
                <a id="nav-docs" href="/docs" data-action="app.nav.show({section: 'docs'})">Docs</a>
            </nav>
            <main id="content">
                <button id="link-player" data-action="openModal('modal-link-player')">Link player</button>
                <button id="rename" data-action="profile.rename(document.getElementById('profile-name').textContent)">Rename</button>
                <button id="broken" data-action="app.nav.show(3.14)">Broken</button>
                <button id="missing" data-action="app.missing()">Missing</button>
            </main>
            <ul id="list"></ul>
        </body></html>
    "##;

    fn recorder(registry: &mut ActionRegistry, calls: &Calls, path: &'static str) {
        let calls = calls.clone();
        registry
            .register(path, move |args| {
                calls.borrow_mut().push((path.to_string(), args.to_vec()));
                Ok(())
            })
            .unwrap();
    }

    fn dashboard() -> (Page, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ActionRegistry::new();
        recorder(&mut registry, &calls, "openModal");
        recorder(&mut registry, &calls, "app.nav.show");
        recorder(&mut registry, &calls, "profile.rename");
        let page = Page::load(DASHBOARD, Rc::new(registry), &DirectiveConfig::default());
        (page, calls)
    }

    #[test]
    fn test_open_modal_is_called_once() {
        let (page, calls) = dashboard();

        let outcome = page.click_by_id("link-player").unwrap();
        assert!(outcome.handled);
        assert!(!outcome.failed);
        assert!(!outcome.default_prevented);
        assert_eq!(
            *calls.borrow(),
            vec![(
                "openModal".to_string(),
                vec![ArgValue::string("modal-link-player")]
            )]
        );
    }

    #[test]
    fn test_repeated_bind_does_not_double_fire() {
        let (page, calls) = dashboard();
        let again = page.bind(None);
        assert_eq!(again.bound, 0);
        assert_eq!(again.already_bound, 6);
        page.bind(None);

        page.click_by_id("link-player");
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_fragment_links_prevent_default() {
        let (page, calls) = dashboard();

        let outcome = page.click_by_id("nav-sessions").unwrap();
        assert!(outcome.default_prevented);
        let outcome = page.click_by_id("nav-docs").unwrap();
        assert!(!outcome.default_prevented);

        let sections: Vec<_> = calls
            .borrow()
            .iter()
            .map(|(_, args)| args[0].as_section().unwrap().to_string())
            .collect();
        assert_eq!(sections, vec!["sessions", "docs"]);
    }

    #[test]
    fn test_failures_are_contained() {
        let (page, calls) = dashboard();

        let outcome = page.click_by_id("broken").unwrap();
        assert!(outcome.handled);
        assert!(outcome.failed);

        let outcome = page.click_by_id("missing").unwrap();
        assert!(outcome.failed);

        // Nothing ran, and the page still works afterwards
        assert!(calls.borrow().is_empty());
        assert!(!page.click_by_id("link-player").unwrap().failed);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_target_errors_and_panics_are_contained() {
        let attempts = Rc::new(RefCell::new(0));
        let mut registry = ActionRegistry::new();
        let counter = attempts.clone();
        registry
            .register("openModal", move |_| {
                *counter.borrow_mut() += 1;
                Err(anyhow::anyhow!("modal not found"))
            })
            .unwrap();
        registry
            .register("app.nav.show", |_| panic!("navigation exploded"))
            .unwrap();
        let page = Page::load(DASHBOARD, Rc::new(registry), &DirectiveConfig::default());

        let outcome = page.click_by_id("link-player").unwrap();
        assert!(outcome.failed);
        assert_eq!(*attempts.borrow(), 1);

        let outcome = page.click_by_id("nav-sessions").unwrap();
        assert!(outcome.failed);
        assert!(outcome.default_prevented);
    }

    #[test]
    fn test_live_text_reads_current_content() {
        let (page, calls) = dashboard();

        page.click_by_id("rename");
        page.render_into("profile-name", "<b>Byron</b>").unwrap();
        page.click_by_id("rename");

        let names: Vec<_> = calls
            .borrow()
            .iter()
            .map(|(_, args)| args[0].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ada", "AdaByron"]);
    }

    #[test]
    fn test_rendered_markup_is_bound() {
        let (page, calls) = dashboard();

        let report = page
            .render_into(
                "list",
                r#"<li><button id="row-1" data-action="openModal('row', 1)">Row</button></li>"#,
            )
            .unwrap();
        assert_eq!(report.bound, 1);

        page.click_by_id("row-1");
        assert_eq!(
            calls.borrow().last().unwrap().1,
            vec![ArgValue::string("row"), ArgValue::number(1)]
        );

        assert!(page.render_into("nowhere", "<p></p>").is_err());
    }

    #[test]
    fn test_rendered_table_rows_are_bound() {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ActionRegistry::new();
        recorder(&mut registry, &calls, "openModal");
        let page = Page::load(
            r#"<table><tbody id="rows"></tbody></table>"#,
            Rc::new(registry),
            &DirectiveConfig::default(),
        );

        let report = page
            .render_into(
                "rows",
                r#"<tr id="r1" data-action="openModal('r')"><td id="cell">x</td></tr>"#,
            )
            .unwrap();
        assert_eq!(report.bound, 1);

        let row = page.document().element_by_id("r1").unwrap();
        assert!(page.is_bound(&row));
        assert!(page.click_by_id("cell").unwrap().handled);
        assert_eq!(
            *calls.borrow(),
            vec![("openModal".to_string(), vec![ArgValue::string("r")])]
        );
    }

    #[test]
    fn test_nested_actions_fire_once_per_click() {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ActionRegistry::new();
        recorder(&mut registry, &calls, "openModal");
        let page = Page::load(
            r#"<div id="card" data-action="openModal('card')">
                   <button id="b" data-action="openModal('x')">Open</button>
                   <span id="title">Card</span>
               </div>"#,
            Rc::new(registry),
            &DirectiveConfig::default(),
        );

        let outcome = page.click_by_id("b").unwrap();
        assert!(outcome.handled);
        assert!(!outcome.failed);
        assert_eq!(
            *calls.borrow(),
            vec![("openModal".to_string(), vec![ArgValue::string("x")])]
        );

        page.click_by_id("title");
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1].1, vec![ArgValue::string("card")]);
    }

    #[test]
    fn test_action_can_render_and_rebind_during_click() {
        let page_slot: Rc<RefCell<Weak<Page>>> = Rc::new(RefCell::new(Weak::new()));
        let loads = Rc::new(RefCell::new(0));

        let mut registry = ActionRegistry::new();
        let slot = page_slot.clone();
        registry
            .register("sessions.load", move |_| {
                let page = slot
                    .borrow()
                    .upgrade()
                    .ok_or_else(|| anyhow::anyhow!("page is gone"))?;
                page.render_into(
                    "list",
                    r#"<li id="session-1" data-action="sessions.open('s1')">s1</li>"#,
                )?;
                Ok(())
            })
            .unwrap();
        let opened = loads.clone();
        registry
            .register("sessions.open", move |args| {
                assert_eq!(args, [ArgValue::string("s1")]);
                *opened.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();

        let page = Rc::new(Page::load(
            r#"<button id="load" data-action="sessions.load()">Load</button><ul id="list"></ul>"#,
            Rc::new(registry),
            &DirectiveConfig::default(),
        ));
        *page_slot.borrow_mut() = Rc::downgrade(&page);

        assert!(!page.click_by_id("load").unwrap().failed);
        let session = page.document().element_by_id("session-1").unwrap();
        assert!(page.is_bound(&session));

        assert!(!page.click(&session).failed);
        assert_eq!(*loads.borrow(), 1);
    }
}
