//! Solves de punta a punta con el plugin de herramientas básicas y el host
//! en memoria.

use trazo_core::model::{Value, ValueKind, ValueSpec};
use trazo_core::{ActionRuntime, CollectingDiagnostics, CoreActionError, ExecutionInfo, HostAccess,
                 HostDocument, InMemoryEventStore, MapDataSource, MemoryDataSink, MemoryDocument, SolveEventKind, SolveStatus};

use trazo_adapters::{host_number, BasicToolsPlugin, DomainToHost, HostCurve, HostLine, HostPoint, HostToDomain};
use trazo_geom::{LinearElement, Polyline, SectionFamily, SectionProfile, Shape, ShapeCollection, Vector};

const TOL: f64 = 1e-9;

struct Host {
    source: MapDataSource,
    sink: MemoryDataSink,
    document: MemoryDocument,
    diagnostics: CollectingDiagnostics,
}

impl Host {
    fn new() -> Self {
        Self { source: MapDataSource::new(),
               sink: MemoryDataSink::new(),
               document: MemoryDocument::new(),
               diagnostics: CollectingDiagnostics::new() }
    }

    fn access(&mut self) -> HostAccess<'_> {
        HostAccess { source: &mut self.source,
                     sink: &mut self.sink,
                     document: &mut self.document,
                     diagnostics: &mut self.diagnostics }
    }
}

fn runtime() -> ActionRuntime<InMemoryEventStore> {
    ActionRuntime::builder().load_module(&BasicToolsPlugin)
                            .converters(&HostToDomain)
                            .converters(&DomainToHost)
                            .build()
}

#[test]
fn plugin_module_registers_all_commands() {
    let rt = runtime();
    let commands = rt.actions().commands();
    assert_eq!(commands,
               vec!["CreateRectangularSection", "DrawLinearElement", "MakeElements", "CreatePanelElementInCurve"]);
    assert!(rt.actions().resolve("DrawLinearElement").is_ok());
    assert!(matches!(rt.actions().resolve("NoSuchTool"),
                     Err(CoreActionError::UnknownCommand(_))));
}

#[test]
fn create_rectangular_section_full_solve() {
    let mut rt = runtime();
    let mut host = Host::new();
    host.source.insert("Name", Value::text("R30x30"));
    host.source.insert("Depth", host_number(300.0));
    host.source.insert("Width", host_number(300.0));

    let report = rt.solve("CreateRectangularSection", ExecutionInfo::new("cmp-1", 0), host.access())
                   .expect("solve should complete");

    assert_eq!(report.status, SolveStatus::Completed);
    assert_eq!(report.published, 2);

    // la sección viaja con su kind semántico (sin equivalente host)
    let section_value = host.sink.get("Section").expect("Section published");
    assert_eq!(section_value.kind, ValueKind::Section);
    let section = SectionFamily::from_value(section_value).unwrap();
    assert_eq!(section.name, "R30x30");
    assert_eq!(section.profile, SectionProfile::Rectangular { depth: 0.3, width: 0.3 });

    // el perímetro se publica convertido al universo host (mm)
    let perimeter_value = host.sink.get("Perimeter").expect("Perimeter published");
    assert_eq!(perimeter_value.kind, ValueKind::HostCurve);
    let perimeter = HostCurve::from_value(perimeter_value).unwrap();
    assert_eq!(perimeter.points.len(), 5);
    assert!((perimeter.points[0].x + 150.0).abs() < TOL);

    // entradas numéricas convertidas durante el binding
    let events = rt.list_events_for(report.solve_id);
    assert!(events.iter()
                  .any(|e| matches!(&e.kind, SolveEventKind::InputBound { input, converted: true, .. } if input == "Depth")));
    // Material era opcional y no vino
    assert!(events.iter()
                  .any(|e| matches!(&e.kind, SolveEventKind::InputMissing { input, required: false } if input == "Material")));
}

#[test]
fn missing_required_perimeter_aborts_without_instance_effects() {
    let mut rt = runtime();
    let mut host = Host::new();

    let report = rt.solve("CreatePanelElementInCurve", ExecutionInfo::new("cmp-2", 0), host.access())
                   .expect("missing input is not a fault");

    assert_eq!(report.status, SolveStatus::MissingInput("Perimeter".to_string()));
    assert_eq!(report.published, 0);
    assert!(host.sink.is_empty());
    assert_eq!(host.document.live_count(), 0);
    assert!(host.diagnostics.has_errors());
}

#[test]
fn draw_linear_element_binds_host_line_and_is_idempotent() {
    let mut rt = runtime();
    let mut host = Host::new();
    host.source.insert("Line",
                       HostLine::new(HostPoint::new(0.0, 0.0, 0.0), HostPoint::new(2000.0, 0.0, 0.0)).into_value());

    let first = rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-3", 0), host.access())
                  .expect("first solve");
    assert_eq!(first.status, SolveStatus::Completed);
    assert_eq!(host.document.live_count(), 1);

    let element_value = host.sink.get("Element").expect("Element published");
    let element = LinearElement::from_value(element_value).unwrap();
    assert!((element.geometry.length() - 2.0).abs() < TOL);

    // re-ejecutar la misma invocación reemplaza, no acumula
    let second = rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-3", 1), host.access())
                   .expect("second solve");
    assert_eq!(second.status, SolveStatus::Completed);
    assert_eq!(host.document.live_count(), 1);

    let events = rt.list_events_for(second.solve_id);
    assert!(events.iter().any(|e| matches!(e.kind, SolveEventKind::CleanupInvoked { .. })));
}

#[test]
fn persistent_section_is_remembered_across_solves() {
    let mut rt = runtime();
    let mut host = Host::new();
    let section = SectionFamily::new("RememberedSection", SectionProfile::rectangular(0.2, 0.2).unwrap());
    host.source.insert("Line",
                       HostLine::new(HostPoint::new(0.0, 0.0, 0.0), HostPoint::new(1000.0, 0.0, 0.0)).into_value());
    host.source.insert("Section", section.clone().into_value());

    rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-4", 0), host.access())
      .expect("first solve");

    // el host deja de entregar la sección; el runtime recuerda la última
    host.source.remove("Section");
    rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-4", 1), host.access())
      .expect("second solve");

    let element = LinearElement::from_value(host.sink.get("Element").unwrap()).unwrap();
    assert_eq!(element.section.map(|s| s.name), Some("RememberedSection".to_string()));

    // otra invocación no hereda el recuerdo
    let report = rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-5", 0), host.access())
                   .expect("third solve");
    assert_eq!(report.status, SolveStatus::Completed);
    let element = LinearElement::from_value(host.sink.get("Element").unwrap()).unwrap();
    assert!(element.section.is_none());
}

#[test]
fn degenerate_line_halts_execute_silently() {
    let mut rt = runtime();
    let mut host = Host::new();
    host.source.insert("Line",
                       HostLine::new(HostPoint::new(5.0, 5.0, 0.0), HostPoint::new(5.0, 5.0, 0.0)).into_value());

    let report = rt.solve("DrawLinearElement", ExecutionInfo::new("cmp-6", 0), host.access())
                   .expect("silent halt is not a fault");

    assert!(matches!(report.status, SolveStatus::StageFailed(trazo_core::Stage::Execute)));
    assert!(host.sink.is_empty());
    assert_eq!(host.document.live_count(), 0);
}

#[test]
fn execute_fault_propagates_and_previous_state_survives() {
    let mut rt = runtime();
    let mut host = Host::new();

    // primera pasada: borde cerrado, solve completo
    let closed = Polyline::new(vec![Vector::zero(),
                                    Vector::new(1.0, 0.0, 0.0),
                                    Vector::new(1.0, 1.0, 0.0),
                                    Vector::zero()]);
    host.source.insert("Perimeter", closed.into_value());
    let first = rt.solve("CreatePanelElementInCurve", ExecutionInfo::new("cmp-7", 0), host.access())
                  .expect("closed border should complete");
    assert_eq!(first.status, SolveStatus::Completed);
    assert_eq!(host.document.live_count(), 1);

    // segunda pasada: borde abierto, execute falla y el error se propaga
    let open = Polyline::new(vec![Vector::zero(), Vector::new(1.0, 0.0, 0.0), Vector::new(1.0, 1.0, 0.0)]);
    host.source.insert("Perimeter", open.into_value());
    let err = rt.solve("CreatePanelElementInCurve", ExecutionInfo::new("cmp-7", 1), host.access())
                .unwrap_err();
    assert!(matches!(err, CoreActionError::ExecuteFault(_)));

    // la limpieza corrió sobre la instancia exitosa previa sin borrar su objeto
    assert_eq!(host.document.live_count(), 1);

    // tercera pasada: vuelve a cerrar; la invocación sigue operable
    let closed = Polyline::new(vec![Vector::zero(),
                                    Vector::new(2.0, 0.0, 0.0),
                                    Vector::new(2.0, 2.0, 0.0),
                                    Vector::zero()]);
    host.source.insert("Perimeter", closed.into_value());
    let third = rt.solve("CreatePanelElementInCurve", ExecutionInfo::new("cmp-7", 2), host.access())
                  .expect("recovered solve");
    assert_eq!(third.status, SolveStatus::Completed);
    assert_eq!(host.document.live_count(), 1);

    let events = rt.list_events_for(third.solve_id);
    assert!(events.iter().any(|e| matches!(e.kind, SolveEventKind::CleanupInvoked { .. })));
}

#[test]
fn make_elements_assigns_sections_from_layers() {
    let mut rt = runtime();
    let mut host = Host::new();

    let shapes = ShapeCollection::new(vec![
        Shape::new(trazo_geom::Curve::Line(trazo_geom::Line::new(Vector::zero(), Vector::new(1.0, 0.0, 0.0))))
            .on_layer("Columns"),
        Shape::new(trazo_geom::Curve::Line(trazo_geom::Line::new(Vector::zero(), Vector::new(0.0, 1.0, 0.0))))
            .on_layer("Columns"),
        Shape::new(trazo_geom::Curve::Line(trazo_geom::Line::new(Vector::zero(), Vector::new(0.0, 0.0, 1.0)))),
    ]);
    host.source.insert("Geometry", shapes.into_value());
    host.source.insert("PropertiesFromLayers", Value::flag(true));

    let report = rt.solve("MakeElements", ExecutionInfo::new("cmp-8", 0), host.access())
                   .expect("solve should complete");
    assert_eq!(report.status, SolveStatus::Completed);

    let elements_value = host.sink.get("Elements").expect("Elements published");
    assert_eq!(elements_value.kind, ValueKind::Collection);
    let elements: Vec<LinearElement> = serde_json::from_value(elements_value.payload.clone()).unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].section.as_ref().map(|s| s.name.as_str()), Some("Columns"));
    assert_eq!(elements[1].section.as_ref().map(|s| s.name.as_str()), Some("Columns"));
    assert!(elements[2].section.is_none());

    // una sola sección compartida por capa
    assert_eq!(elements[0].section.as_ref().map(|s| s.id), elements[1].section.as_ref().map(|s| s.id));

    // 3 elementos + 1 sección por capa en el documento
    assert_eq!(host.document.live_count(), 4);
}
