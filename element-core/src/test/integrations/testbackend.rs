use std::fmt;
use std::rc::{ Rc, Weak };
use std::sync::Mutex;
use hashbrown::{ HashMap, HashSet };
use element_toolkit::lock;
use element_toolkit::error::Error;
use crate::{ Backend, InstanceController, InstanceFactory };

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct TestNode {
    pub tag: String,
    pub text: String
}

impl TestNode {
    pub fn new(tag: &str, text: &str) -> TestNode {
        TestNode { tag: tag.to_string(), text: text.to_string() }
    }
}

pub struct TestFragment(pub Vec<TestNode>);

impl TestFragment {
    pub fn one(tag: &str, text: &str) -> TestFragment {
        TestFragment(vec![TestNode::new(tag,text)])
    }
}

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct TestElement(pub u64);

/* The backend owns each shadow tree, as a document would. Boundaries only point at it. */
type ShadowTree = Rc<Mutex<Vec<TestNode>>>;

#[derive(Clone)]
pub struct TestBoundary {
    id: u64,
    nodes: Weak<Mutex<Vec<TestNode>>>
}

impl TestBoundary {
    fn tree(&self) -> Result<ShadowTree,Error> {
        self.nodes.upgrade().ok_or_else(|| Error::host(&format!("boundary {} was collected",self.id)))
    }

    pub fn is_live(&self) -> bool { self.nodes.upgrade().is_some() }

    pub fn nodes(&self) -> Vec<TestNode> {
        self.nodes.upgrade().map(|x| lock!(x).clone()).unwrap_or_default()
    }
}

impl PartialEq for TestBoundary {
    fn eq(&self, other: &TestBoundary) -> bool { self.id == other.id }
}

impl fmt::Debug for TestBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"TestBoundary({})",self.id)
    }
}

struct TestBackendState {
    factories: HashMap<String,(Vec<String>,InstanceFactory<TestBackend>)>,
    foreign: HashSet<String>,
    trees: HashMap<u64,ShadowTree>,
    collected: HashSet<u64>,
    refused_tags: HashSet<String>,
    refuse_attach: bool,
    attaches: u64,
    next_id: u64
}

/* A stand-in for a document: remembers definitions, hands out elements and boundaries, and can
 * be told to refuse things the way a browser sometimes does.
 */
#[derive(Clone)]
pub struct TestBackend(Rc<Mutex<TestBackendState>>);

impl TestBackend {
    pub(crate) fn new() -> TestBackend {
        TestBackend(Rc::new(Mutex::new(TestBackendState {
            factories: HashMap::new(),
            foreign: HashSet::new(),
            trees: HashMap::new(),
            collected: HashSet::new(),
            refused_tags: HashSet::new(),
            refuse_attach: false,
            attaches: 0,
            next_id: 0
        })))
    }

    /* The host constructing an occurrence of `name`, as the parser would on meeting the tag. */
    pub(crate) fn create(&self, name: &str) -> Option<InstanceController<TestBackend>> {
        let (factory,id) = {
            let mut state = lock!(self.0);
            let factory = state.factories.get(name)?.1.clone();
            state.next_id += 1;
            (factory,state.next_id)
        };
        Some(factory(TestElement(id)))
    }

    /* Some other script on the page already took this name. */
    pub(crate) fn define_elsewhere(&self, name: &str) {
        lock!(self.0).foreign.insert(name.to_string());
    }

    pub(crate) fn refuse_tag(&self, tag: &str) {
        lock!(self.0).refused_tags.insert(tag.to_string());
    }

    pub(crate) fn refuse_attach(&self, yn: bool) {
        lock!(self.0).refuse_attach = yn;
    }

    pub(crate) fn attach_count(&self) -> u64 { lock!(self.0).attaches }

    /* The element was removed and garbage collected, taking its shadow tree with it. */
    pub(crate) fn collect(&self, element: &TestElement) {
        let mut state = lock!(self.0);
        state.trees.remove(&element.0);
        state.collected.insert(element.0);
    }

    pub(crate) fn observed(&self, name: &str) -> Vec<String> {
        lock!(self.0).factories.get(name).map(|x| x.0.clone()).unwrap_or_default()
    }
}

impl Backend for TestBackend {
    type Element = TestElement;
    type Boundary = TestBoundary;
    type Fragment = TestFragment;

    fn register(&self, name: &str, observed: &[String], factory: InstanceFactory<TestBackend>) -> Result<(),Error> {
        let mut state = lock!(self.0);
        if state.foreign.contains(name) || state.factories.contains_key(name) {
            return Err(Error::duplicate(&format!("host already defines <{}>",name)));
        }
        if name.is_empty() {
            return Err(Error::host("empty element name"));
        }
        state.factories.insert(name.to_string(),(observed.to_vec(),factory));
        Ok(())
    }

    fn attach_boundary(&self, element: &TestElement) -> Result<TestBoundary,Error> {
        let mut state = lock!(self.0);
        if state.refuse_attach {
            return Err(Error::host("attach refused"));
        }
        if state.collected.contains(&element.0) {
            return Err(Error::host(&format!("element {} was collected",element.0)));
        }
        if state.trees.contains_key(&element.0) {
            return Err(Error::host(&format!("element {} already has a boundary",element.0)));
        }
        let tree : ShadowTree = Rc::new(Mutex::new(vec![]));
        let nodes = Rc::downgrade(&tree);
        state.trees.insert(element.0,tree);
        state.attaches += 1;
        state.next_id += 1;
        Ok(TestBoundary { id: state.next_id, nodes })
    }

    fn append_fragment(&self, boundary: &TestBoundary, fragment: TestFragment) -> Result<(),Error> {
        let state = lock!(self.0);
        if let Some(node) = fragment.0.iter().find(|x| state.refused_tags.contains(&x.tag)) {
            return Err(Error::host(&format!("refused to append <{}>",node.tag)));
        }
        lock!(boundary.tree()?).extend(fragment.0);
        Ok(())
    }

    fn clear_boundary(&self, boundary: &TestBoundary) -> Result<(),Error> {
        lock!(boundary.tree()?).clear();
        Ok(())
    }

    fn error_fragment(&self, name: &str, message: &str) -> Result<TestFragment,Error> {
        Ok(TestFragment::one("error",&format!("<{}> failed: {}",name,message)))
    }
}
